use argbind::derive::*;
use argbind::{Delegate, OptionDefinition, ParseError, ParseResult, Parser};

#[derive(Debug, Default, PartialEq, Eq, Container)]
struct Compress {
    #[argbind(alias = "l", help = "The compression level.")]
    level: Option<u8>,
}

#[derive(Debug, Default, PartialEq, Eq, Container)]
struct Encrypt {
    #[argbind(required, help = "The encryption key.")]
    key: String,
}

fn main() {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();

    match parse_tokens(&tokens) {
        Ok(result) => {
            if let Ok(compress) = result.get::<Compress>() {
                println!("compress: {compress:?}");
            }

            if let Ok(encrypt) = result.get::<Encrypt>() {
                println!("encrypt: {encrypt:?}");
            }
        }
        Err(error) => {
            eprintln!("Parse error: {error}");
            std::process::exit(1);
        }
    }
}

// Each `-plugin NAME` registers the options of that plugin, available to the tokens which follow it.
fn parse_tokens(tokens: &[&str]) -> Result<ParseResult, ParseError> {
    let mut parser = Parser::new("plugins").about("Enable plugins, each bringing its own options.");
    parser.add(
        OptionDefinition::new(
            "plugin",
            Delegate::new(|name: String, registrar| match name.as_str() {
                "compress" => registrar.register::<Compress>(),
                "encrypt" => registrar.register::<Encrypt>(),
                _ => Ok(()),
            }),
        )
        .alias("p")
        .help("Enable a plugin: compress or encrypt."),
    )?;

    parser.parse_tokens(tokens)
}
