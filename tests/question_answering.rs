#![cfg(feature = "cuda")]

use candle_qa::error::Result;
use candle_qa::question_answering::{BertSize, QuestionAnsweringPipelineBuilder};

#[test]
fn qa_basic() -> Result<()> {
    let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base)
        .cuda(0)
        .build()?;

    let output = pipeline.run((
        "What color is the sky?",
        "The sky is blue today, without a single cloud.",
    ))?;

    assert!(output.answer.text.to_lowercase().contains("blue"));
    assert!(output.answer.score >= 0.0 && output.answer.score <= 1.0);
    Ok(())
}

#[test]
fn qa_is_deterministic() -> Result<()> {
    let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base)
        .cuda(0)
        .build()?;

    let question = "Who designed the tower?";
    let context = "The tower was designed by Gustave Eiffel's engineering company.";

    let first = pipeline.run((question, context))?;
    let second = pipeline.run((question, context))?;

    assert_eq!(first.answer.text, second.answer.text);
    assert_eq!(first.answer.score.to_bits(), second.answer.score.to_bits());
    Ok(())
}

#[test]
fn qa_batch_reports_every_pair() -> Result<()> {
    let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base)
        .cuda(0)
        .build()?;

    let pairs: &[(&str, &str)] = &[
        ("What is the capital of France?", "Paris is the capital of France."),
        ("What does the factory produce?", "The plant manufactures electric buses."),
        ("How long is the river?", "At 6,650 km, the Nile is among the longest rivers."),
    ];

    let output = pipeline.run(pairs)?;

    assert_eq!(output.results.len(), pairs.len());
    assert_eq!(output.stats.items_processed, pairs.len());
    for r in output.results {
        let answer = r.answer?;
        assert!(answer.score >= 0.0 && answer.score <= 1.0);
    }
    Ok(())
}

#[test]
fn qa_survives_oversized_context() -> Result<()> {
    let pipeline = QuestionAnsweringPipelineBuilder::bert(BertSize::Base)
        .cuda(0)
        .build()?;

    // Far past the 512-token window; the tokenizer truncates the context.
    let context = "The warehouse stores copper wire. ".repeat(400);
    let output = pipeline.run(("What does the warehouse store?", context.as_str()))?;

    assert!(output.answer.score >= 0.0);
    Ok(())
}
