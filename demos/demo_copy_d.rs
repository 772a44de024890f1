use argbind::derive::*;
use argbind::Parser;
use std::error::Error;

#[derive(Debug, Default, PartialEq, Eq, Container)]
struct Params {
    #[argbind(position = 1, required, help = "The file to copy.")]
    source: String,
    #[argbind(position = 2, help = "Where to copy the file to.")]
    destinations: Vec<String>,
    #[argbind(alias = "f", help = "Overwrite existing files.")]
    force: bool,
    #[argbind(help = "The permission bits for the copies.")]
    mode: Option<u32>,
}

fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

    match parse_tokens(&tokens) {
        Ok(params) => {
            for destination in &params.destinations {
                println!(
                    "copy {} -> {destination} (force: {}, mode: {:?})",
                    params.source, params.force, params.mode
                );
            }
        }
        Err(error) => {
            eprintln!("Parse error: {error}");
            std::process::exit(1);
        }
    }
}

// Unit-testable function to configure the parser and execute it against the specified tokens.
fn parse_tokens(tokens: &[&str]) -> Result<Params, Box<dyn Error>> {
    let mut parser = Parser::new("copy").about("Copy a file to any number of destinations.");
    parser.register::<Params>()?;
    let mut result = parser.parse_tokens(tokens)?;
    Ok(result.take::<Params>()?)
}
