mod round;

pub use round::{Advance, QuestionReview, QuizRound, QuizState};

use crate::api::BackendClient;
use crate::error::ZeroError;
use crate::ui;
use dialoguer::Select;
use std::time::Duration;

/// How long the results breakdown stays on screen before the round reports
/// its score and the flow moves to the interview.
const RESULTS_DISPLAY: Duration = Duration::from_secs(3);

/// Request a generated quiz. One request, no automatic retry: a failure
/// leaves the round unusable and the error is surfaced by the caller.
pub async fn load(
    client: &BackendClient,
    domain: &str,
    resume_text: &str,
) -> Result<QuizRound, ZeroError> {
    let questions = client.generate_quiz(domain, resume_text).await?;
    Ok(QuizRound::new(questions)?)
}

/// Drive a loaded round interactively on the console and return the final
/// score once the results display delay has elapsed.
pub async fn run_console(mut round: QuizRound) -> Result<f64, ZeroError> {
    let total = round.question_count();

    loop {
        let (index, prompt, labels) = {
            let Some((index, question)) = round.active_question() else {
                break;
            };
            let labels: Vec<String> = question
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("{}. {}", option_letter(i), option))
                .collect();
            (index, question.question.clone(), labels)
        };

        ui::print_quiz_question(index, total, &prompt);

        let picked = Select::new()
            .with_prompt("Your answer")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| ZeroError::Other(anyhow::anyhow!("answer prompt failed: {e}")))?;

        round.select_answer(index, picked)?;
        round.advance();
    }

    ui::print_quiz_results(round.score(), round.review());
    tokio::time::sleep(RESULTS_DISPLAY).await;

    round
        .finish()
        .ok_or_else(|| ZeroError::Other(anyhow::anyhow!("quiz round finished twice")))
}

fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_letters_run_from_a() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }
}
