//! Console rendering for the assessment flow.
//!
//! Everything here writes straight to stdout; the state machines never
//! render, so these helpers are the only place presentation lives.

use super::style as ui;
use crate::quiz::QuestionReview;
use crate::report::Report;

pub fn print_dashboard_header() {
    println!();
    println!("  {}", ui::header("Zero"));
    println!(
        "  {}",
        ui::dim("The AI-Powered Candidate Assessment System")
    );
    println!();
}

pub fn print_upload_success() {
    println!(
        "  {} {}",
        ui::success("✓"),
        "Ready! Redirecting to Interview Room..."
    );
}

pub fn print_quiz_loading() {
    println!();
    println!("  {}", ui::dim("Generating your personalized quiz..."));
}

pub fn print_quiz_question(index: usize, total: usize, prompt: &str) {
    println!();
    println!(
        "  {} {}",
        ui::cyan(format!("Question {} of {}", index + 1, total)),
        ui::dim("· Round 1/2 - Technical Quiz")
    );
    println!("  {}", ui::header(prompt));
}

pub fn print_quiz_results<'a>(score: f64, review: impl Iterator<Item = QuestionReview<'a>>) {
    println!();
    println!("  {}", ui::header("Quiz Complete!"));
    println!("  {}", ui::value(format!("{}%", score.round())));
    for entry in review {
        let mark = if entry.correct {
            ui::success("✓")
        } else {
            ui::danger("✗")
        };
        let answer = entry
            .selected
            .and_then(|i| entry.question.options.get(i))
            .map_or("Not answered", String::as_str);
        println!("  {mark} {}", entry.question.question);
        if entry.correct {
            println!("      {}", ui::dim(format!("Your answer: {answer}")));
        } else {
            let correct = entry
                .question
                .options
                .get(entry.question.correct_index)
                .map_or("", String::as_str);
            println!(
                "      {}",
                ui::dim(format!("Your answer: {answer} (Correct: {correct})"))
            );
        }
    }
    println!();
    println!("  {}", ui::dim("Moving to AI Interview in 3 seconds..."));
}

pub fn print_interview_header(duration_secs: u64) {
    println!();
    println!(
        "  {} {}",
        ui::danger("●"),
        ui::header("Interview in Session")
    );
    println!(
        "  {}",
        ui::dim(format!(
            "Round 2/2 - AI Interview · {} on the clock · Ctrl-C to end",
            format_clock(duration_secs)
        ))
    );
    println!();
}

pub fn print_ai_utterance(text: &str) {
    println!();
    println!("  {} {}", ui::accent("Zero ▸"), text);
}

pub fn print_listening_prompt() {
    println!("  {}", ui::dim("Listening... (type your answer, Enter to finish)"));
}

pub fn print_caption(text: &str) {
    println!("  {} {}", ui::dim("cc ▸"), ui::dim(text));
}

pub fn clear_caption() {
    println!();
}

pub fn print_time_remaining(remaining_secs: u64) {
    println!(
        "  {}",
        ui::dim(format!("⏱ {} remaining", format_clock(remaining_secs)))
    );
}

pub fn print_warning_banner(text: &str) {
    println!();
    println!(
        "  {} {}",
        ui::warn("⚠ Warning: Suspicious Activity Detected."),
        ui::warn(text)
    );
}

pub fn print_banner_dismissed() {
    println!("  {}", ui::dim("Warning dismissed."));
}

pub fn print_generating_report() {
    println!();
    println!("  {}", ui::dim("Analyzing... generating your report."));
}

pub fn print_error(text: &str) {
    eprintln!("  {} {}", ui::danger("✗"), text);
}

pub fn print_report(role: &str, report: &Report) {
    println!();
    println!("  {}", ui::header("Interview Report"));
    println!("  {}", ui::dim(format!("Candidate: {role} Role Application")));
    println!();
    println!(
        "  {} {}",
        ui::cyan("Overall score:"),
        ui::value(format!("{}", report.overall_score.round()))
    );
    if !report.strengths.is_empty() {
        println!("  {}", ui::success("Strengths"));
        for item in &report.strengths {
            println!("    {} {item}", ui::success("+"));
        }
    }
    if !report.weaknesses.is_empty() {
        println!("  {}", ui::danger("Weaknesses"));
        for item in &report.weaknesses {
            println!("    {} {item}", ui::danger("-"));
        }
    }
    if !report.summary.is_empty() {
        println!("  {}", ui::cyan("Summary"));
        println!("    {}", report.summary);
    }
    println!(
        "  {} {}",
        ui::cyan("Recommendation:"),
        ui::header(&report.recommendation)
    );
    println!();
}

pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats_minutes_and_padded_seconds() {
        assert_eq!(format_clock(300), "5:00");
        assert_eq!(format_clock(61), "1:01");
        assert_eq!(format_clock(9), "0:09");
        assert_eq!(format_clock(0), "0:00");
    }
}
