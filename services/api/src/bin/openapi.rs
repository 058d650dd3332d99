//! services/api/src/bin/openapi.rs
//!
//! Writes the comment wall's OpenAPI document to disk.
//!
//! Usage: `openapi [OUTPUT]`. `OUTPUT` defaults to `openapi.json`; `-` prints
//! the document to stdout instead.

use api_lib::web::rest::ApiDoc;
use std::{env, error::Error, fs, path::PathBuf};
use utoipa::OpenApi;

const DEFAULT_OUTPUT: &str = "openapi.json";

fn main() -> Result<(), Box<dyn Error>> {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json()?;

    match env::args().nth(1).as_deref() {
        Some("-") => println!("{json}"),
        target => {
            let path = PathBuf::from(target.unwrap_or(DEFAULT_OUTPUT));
            fs::write(&path, json)?;
            eprintln!(
                "Wrote {} ({} paths, v{}) to {}",
                doc.info.title,
                doc.paths.paths.len(),
                doc.info.version,
                path.display()
            );
        }
    }
    Ok(())
}
