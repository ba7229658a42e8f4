//! Prompt templates for the research pipeline.

use chrono::Utc;

/// System prompt shared by every research call.
pub fn system_prompt() -> String {
    format!(
        r#"You are an expert researcher. Today is {}. Follow these instructions when responding:
  - You may be asked to research subjects that is after your knowledge cutoff, assume the user is right when presented with news.
  - The user is a highly experienced analyst, no need to simplify it, be as detailed as possible and make sure your response is correct.
  - Be highly organized.
  - Suggest solutions that I didn't think about.
  - Be proactive and anticipate my needs.
  - Treat me as an expert in all subject matter.
  - Mistakes erode my trust, so be accurate and thorough.
  - Provide detailed explanations, I'm comfortable with lots of detail.
  - Value good arguments over authorities, the source is irrelevant.
  - Consider new technologies and contrarian ideas, not just the conventional wisdom.
  - You may use high levels of speculation or prediction, just flag it for me."#,
        Utc::now().to_rfc3339()
    )
}

pub fn serp_queries_prompt(query: &str, learnings: &[String], num_queries: usize) -> String {
    let mut prompt = format!(
        "Given the following prompt from the user, generate a list of SERP queries to research the topic. \
         Return a maximum of {num_queries} queries, but feel free to return less if the original prompt is clear. \
         Make sure each query is unique and not similar to each other: <prompt>{query}</prompt>\n\n"
    );
    if !learnings.is_empty() {
        prompt.push_str(&format!(
            "Here are some learnings from previous research, use them to generate more specific queries: {}",
            learnings.join("\n")
        ));
    }
    prompt
}

pub fn serp_result_prompt(
    query: &str,
    contents: &[String],
    num_learnings: usize,
    num_follow_up_questions: usize,
) -> String {
    let contents = contents
        .iter()
        .map(|content| format!("<content>\n{content}\n</content>"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Given the following contents from a SERP search for the query <query>{query}</query>, \
         generate a list of learnings from the contents. Return a maximum of {num_learnings} learnings, \
         but feel free to return less if the contents are clear. Make sure each learning is unique and \
         not similar to each other. The learnings should be concise and to the point, as detailed and \
         information dense as possible. Make sure to include any entities like people, places, companies, \
         products, things, etc in the learnings, as well as any exact metrics, numbers, or dates. \
         The learnings will be used to research the topic further. Also return up to \
         {num_follow_up_questions} follow-up questions.\n\n<contents>{contents}</contents>"
    )
}

pub fn report_prompt(prompt: &str, learnings: &str) -> String {
    format!(
        "Given the following prompt from the user, write a final report on the topic using the learnings \
         from research. Make it as detailed as possible, aim for 3 or more pages, include ALL the learnings \
         from research:\n\n<prompt>{prompt}</prompt>\n\nHere are all the learnings from previous research:\n\n\
         <learnings>\n{learnings}\n</learnings>"
    )
}

pub fn feedback_prompt(query: &str, num_questions: usize) -> String {
    format!(
        "Given the following query from the user, ask some follow up questions to clarify the research \
         direction. Return a maximum of {num_questions} questions, but feel free to return less if the \
         original query is clear: <query>{query}</query>"
    )
}
