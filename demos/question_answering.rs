use candle_qa::error::Result;
use candle_qa::question_answering::{BertSize, QuestionAnsweringPipelineBuilder};

fn main() -> Result<()> {
    println!("Building pipeline...");

    let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base).build()?;

    println!("Pipeline built successfully.");

    let question = "What color is the sky?";
    let context = "The sky is blue today, without a single cloud.";

    // Single pair - direct access!
    let output = pipeline.run((question, context))?;

    println!("\n=== Question Answering Results ===");
    println!("Question: \"{}\"", question);
    println!("Context:  \"{}\"", context);
    println!(
        "Answer: \"{}\" (confidence: {:.4})",
        output.answer.text, output.answer.score
    );
    println!(
        "Completed in {:.2}ms",
        output.stats.total_time.as_secs_f64() * 1000.0
    );

    // Unanswerable questions come back empty, not as errors.
    let output = pipeline.run((
        "Who painted the ceiling?",
        "The sky is blue today, without a single cloud.",
    ))?;
    if output.answer.is_empty() {
        println!("\nNo answer found in the context.");
    } else {
        println!("\nUnexpected answer: \"{}\"", output.answer.text);
    }

    // Batch inference - results include the question!
    println!("\n=== Batch Inference ===");
    let pairs = &[
        (
            "What is the capital of France?",
            "Paris is the capital and largest city of France.",
        ),
        (
            "When did the museum open?",
            "The museum opened its doors to the public in 1793.",
        ),
        (
            "What does the factory produce?",
            "The plant manufactures electric buses for the city.",
        ),
    ];

    let output = pipeline.run(pairs)?;

    for r in output.results {
        let answer = r.answer?;
        println!("{} → \"{}\"", r.question, answer.text);
    }

    Ok(())
}
