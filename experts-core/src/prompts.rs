//! Prompt templates for the four pipeline stages.
//!
//! Each template is a pure function from a structured slot record to the
//! final prompt string. The wording is business content; the mechanical
//! contract is which slots each template embeds, verbatim.

/// Slots for the persona-creation meta-prompt.
#[derive(Debug, Clone, Copy)]
pub struct PersonaSlots<'a> {
    /// The user's question.
    pub question: &'a str,
    /// Optional free-form notes accompanying the question.
    pub notes: &'a str,
}

/// Slots for the answer prompt.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSlots<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub question: &'a str,
    pub notes: &'a str,
}

/// Slots for the refinement prompt.
#[derive(Debug, Clone, Copy)]
pub struct RefineSlots<'a> {
    pub title: &'a str,
    pub prior_answer: &'a str,
    pub question: &'a str,
    pub notes: &'a str,
    /// Whether the user supplied a supporting-reference upload.
    pub has_references: bool,
}

/// Slots for the evaluation prompt.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationSlots<'a> {
    pub description: &'a str,
    pub question: &'a str,
    pub answer: &'a str,
}

/// Ask the model to invent an expert tailored to the question.
///
/// The reply is expected to open with the expert's title, a period, then
/// the description; `Persona::from_generated` splits on that period.
pub fn persona_creation(slots: &PersonaSlots<'_>) -> String {
    format!(
        r#"Act as a highly qualified prompt-engineering and interdisciplinary expert with scientific rigor. Carefully analyze the request below and determine the profile of the specialist best suited to answer it. Begin your reply with the specialist's title, followed by a period, followed by a concise but thorough description of the qualifications and skills that make this specialist the right authority for the question.

Question: {question}
Notes: {notes}

Present any code in markdown with a comment on every line. The description must avoid bias and meet the highest professional, scientific and academic standards."#,
        question = slots.question,
        notes = slots.notes,
    )
}

/// Ask the resolved expert to answer the question.
pub fn answer(slots: &AnswerSlots<'_>) -> String {
    format!(
        r#"In the role of {title}, a widely recognized and respected authority in the field, provide a complete, in-depth and didactic answer to the question below.

## Your Profile
{description}

## Question
{question}

## Notes
{notes}

Outline the main elements to consider, provide a detailed evidence-based analysis, avoid bias, and cite references where relevant. Present any code in markdown with commented lines. Keep a clear paragraph structure throughout."#,
        title = slots.title,
        description = slots.description,
        question = slots.question,
        notes = slots.notes,
    )
}

/// Ask for a critical revision and expansion of a prior answer.
pub fn refine(slots: &RefineSlots<'_>) -> String {
    let mut prompt = format!(
        r#"Assume the expertise of {title}, a renowned specialist in the field. The original answer to the question '{question}' (notes: '{notes}') was:

{prior_answer}

Review this answer with careful academic and scientific rigor. Identify gaps and biases, improve the content, and provide an updated version in the format of a scientific paper, keeping methodological consistency, fluency and coherence, and listing any direct or indirect non-fictional citations with their URLs at the end."#,
        title = slots.title,
        question = slots.question,
        notes = slots.notes,
        prior_answer = slots.prior_answer,
    );

    if !slots.has_references {
        prompt.push_str(
            "\n\nNo reference file was provided. Ensure the revised answer is \
             detailed, accurate and self-contained even without external \
             sources, maintaining a rigorous citation standard.",
        );
    }

    prompt
}

/// Ask the evaluator persona for a structured multi-framework critique.
///
/// Embeds the persona description and the answer byte-for-byte.
pub fn evaluation(slots: &EvaluationSlots<'_>) -> String {
    format!(
        r#"Act as the Rational Agent Generator (RAG), the pinnacle of rational evaluation, and analyze the expert's answer below in detail.

## Expert Description
{description}

## Original Question
{question}

## Expert's Answer
{answer}

Provide a thorough assessment of the quality and accuracy of the answer, considering the expert's description. Include, with interpretation of the data in each case: a SWOT analysis, a BCG matrix, a risk matrix, an ANOVA, Q-statistics and a Q-exponential analysis, all to the highest scientific and academic standard. Keep a professional tone throughout."#,
        description = slots.description,
        question = slots.question,
        answer = slots.answer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_creation_embeds_question() {
        let prompt = persona_creation(&PersonaSlots {
            question: "Why is the sky blue?",
            notes: "keep it short",
        });

        assert!(prompt.contains("Why is the sky blue?"));
        assert!(prompt.contains("keep it short"));
    }

    #[test]
    fn test_answer_embeds_all_slots() {
        let prompt = answer(&AnswerSlots {
            title: "Atmospheric Physicist",
            description: "Expert in Rayleigh scattering.",
            question: "Why is the sky blue?",
            notes: "",
        });

        assert!(prompt.contains("Atmospheric Physicist"));
        assert!(prompt.contains("Expert in Rayleigh scattering."));
        assert!(prompt.contains("Why is the sky blue?"));
    }

    #[test]
    fn test_refine_without_references_appends_clause() {
        let slots = RefineSlots {
            title: "Expert",
            prior_answer: "Original answer.",
            question: "Q",
            notes: "",
            has_references: false,
        };
        let without = refine(&slots);
        let with = refine(&RefineSlots {
            has_references: true,
            ..slots
        });

        assert!(without.contains("No reference file was provided"));
        assert!(!with.contains("No reference file was provided"));
        assert!(without.starts_with(&with));
    }

    #[test]
    fn test_evaluation_embeds_description_and_answer_verbatim() {
        let description = "An expert with \"quotes\" and\nnewlines\tand unicode: é中.";
        let answer_text = "Answer with <markup> & special % characters {braces}.";
        let prompt = evaluation(&EvaluationSlots {
            description,
            question: "Q",
            answer: answer_text,
        });

        assert!(prompt.contains(description));
        assert!(prompt.contains(answer_text));
    }
}
