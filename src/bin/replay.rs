extern crate ictclas;

use std::env;
use std::fs;
use std::process;
use std::sync::Arc;

use ictclas::core::analysis::{Granularity, IctclasTokenizerFactory, TokenStream};
use ictclas::core::index::FieldInverter;
use ictclas::core::segment::{EngineHandle, EngineSettings, ReplayEngine, SegmentProvider};
use ictclas::error::Result;

/// Replays a captured engine payload for `text_file` through the tokenizer
/// and prints the reconciled tokens.
fn replay(text_file: &str, payload_file: &str, granularity: Granularity) -> Result<()> {
    let text = fs::read_to_string(text_file)?;
    let text = text.trim_end_matches(&['\n', '\r'][..]).to_string();
    let payload = fs::read_to_string(payload_file)?;

    let mut engine = ReplayEngine::new();
    engine.record(&text, &payload);
    let handle = EngineHandle::new(Arc::new(engine), EngineSettings::new("."));
    let factory = IctclasTokenizerFactory::new(SegmentProvider::new(Arc::new(handle)), granularity);

    let mut tokenizer = factory.create();
    tokenizer.set_text(text);
    tokenizer.reset()?;
    while tokenizer.next_token()? {
        let token = tokenizer.token();
        println!(
            "{}\t{}\t{}\t{}\t{}",
            token.term_str(),
            token.start_offset,
            token.end_offset,
            token.token_type,
            token.position
        );
    }
    tokenizer.end()?;
    println!(
        "final offset: {}, dropped spans: {}",
        tokenizer.token().end_offset,
        tokenizer.dropped_spans()
    );

    // the indexer would reject a stream that fails here
    let mut inverter = FieldInverter::new(granularity.name());
    inverter.invert(&mut tokenizer)?;
    println!(
        "positions: {}, overlapping tokens: {}",
        inverter.state().position + 1,
        inverter.state().num_overlap
    );
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!("usage: {} <text-file> <engine-json-file> [index|search]", args[0]);
        process::exit(2);
    }
    let granularity = match args.get(3).map(|s| s.as_str()) {
        None | Some("index") => Granularity::Index,
        Some("search") => Granularity::Search,
        Some(other) => match Granularity::from_name(other) {
            Some(g) => g,
            None => {
                eprintln!("unknown granularity '{}'", other);
                process::exit(2);
            }
        },
    };

    if let Err(e) = replay(&args[1], &args[2], granularity) {
        eprintln!("replay failed: {}", e);
        process::exit(1);
    }
}
