use argbind::{Collection, OptionDefinition, ParseError, Parser, Scalar, Toggle};

#[derive(Debug, Default, PartialEq, Eq)]
struct Params {
    source: String,
    destinations: Vec<String>,
    force: bool,
}

fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

    match parse_tokens(&tokens) {
        Ok(params) => {
            for destination in &params.destinations {
                println!(
                    "copy {} -> {destination} (force: {})",
                    params.source, params.force
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
fn parse_tokens(tokens: &[&str]) -> Result<Params, ParseError> {
    let mut params = Params::default();
    let mut parser = Parser::new("copy").about("Copy a file to any number of destinations.");
    parser
        .add(
            OptionDefinition::new("source", Scalar::new(&mut params.source))
                .position(1)
                .required()
                .help("The file to copy."),
        )?
        .add(
            OptionDefinition::new("destinations", Collection::new(&mut params.destinations))
                .position(2)
                .help("Where to copy the file to."),
        )?
        .add(
            OptionDefinition::new("force", Toggle::new(&mut params.force))
                .alias("f")
                .help("Overwrite existing files."),
        )?;

    parser.parse_tokens(tokens)?;
    Ok(params)
}
