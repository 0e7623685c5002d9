// Scoring prompt fragments and the builder that stitches them around the
// rubric and the extracted resume text.

/// Role framing that opens every scoring prompt.
pub const ROLE_FRAMING: &str = "\
You are a scientific resume screening agent for a biomedical research organization \
focused on unlocking the fundamentals of biology and building an open, inclusive future for science.

Review the resume below and score it strictly according to the rubric provided.";

pub const RUBRIC_HEADING: &str = "## SCORING RUBRIC";
pub const RESUME_HEADING: &str = "## RESUME CONTENT";

/// Required structure of the evaluation.
pub const TASK_INSTRUCTIONS: &str = "\
## YOUR TASK
Score this resume following the rubric exactly. For each category:
1. State the score (X/Y points)
2. Quote the specific evidence from the resume that justifies the score
3. Note any bonus points applied

Then provide:
- Total score (sum of all categories)
- Qualification tier (based on the tier table in the rubric)
- 2-3 key strengths
- Any concerns or gaps
- Brief recommendation for the hiring committee

Format your response as a clear, structured evaluation report.";

/// Builds the scoring prompt. Pure and deterministic.
///
/// Section order: role framing, rubric, resume content, task instructions.
/// The rubric and resume text are embedded verbatim; no placeholder
/// substitution is done, so braces or template markers inside either input
/// survive untouched.
pub fn build_scoring_prompt(resume_text: &str, rubric: &str) -> String {
    format!(
        "{ROLE_FRAMING}\n\n\
         {RUBRIC_HEADING}\n{rubric}\n\n\
         {RESUME_HEADING}\n{resume_text}\n\n\
         {TASK_INSTRUCTIONS}\n"
    )
}
