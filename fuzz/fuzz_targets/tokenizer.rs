#![no_main]

use libfuzzer_sys::fuzz_target;
use url::Url;

use linkcard::markup::{Tokenizer, decode};
use linkcard::metadata::{SourcePriority, aggregate};
use linkcard::preview::assembler::assemble;

fuzz_target!(|data: &[u8]| {
    let final_url = Url::parse("https://example.com/page").unwrap();

    // Decoding, tokenizing and assembling must never panic regardless of input
    let html = decode(data, None);
    let record = aggregate(Tokenizer::new(&html), &SourcePriority::default());
    let _ = assemble(record, &final_url);
});
