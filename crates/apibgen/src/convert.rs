use std::fs;
use std::path::{Path, PathBuf};

use crate::prelude::{eprintln, println, *};
use apibgen_core::blueprint::{self, GeneratorConfig};
use apibgen_core::collection::Collection;

#[derive(Debug, clap::Args)]
pub struct Options {
    /// Path to the collection JSON export
    #[clap(env = "APIBGEN_INPUT")]
    pub input: PathBuf,

    /// Path of the API Blueprint document to write
    #[clap(env = "APIBGEN_OUTPUT")]
    pub output: PathBuf,

    /// Flatten every request into a single ungrouped stream
    #[arg(long)]
    pub flat: bool,

    /// Response status code to emit for every request
    #[arg(long, env = "APIBGEN_RESPONSE_CODE")]
    pub response_code: Option<u16>,
}

/// Read and parse a collection export from disk. Both failure modes are
/// fatal: no partial output is ever produced.
pub fn load_collection(path: &Path) -> Result<Collection, Error> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Read(f!("{}: {}", path.display(), e)))?;
    Collection::from_json(&text).map_err(|e| Error::Parse(e.to_string()))
}

pub fn run(options: Options, global: crate::Global) -> Result<()> {
    let collection = load_collection(&options.input)?;

    let mut config = if options.flat {
        GeneratorConfig::flat()
    } else {
        GeneratorConfig::grouped()
    };
    if let Some(code) = options.response_code {
        config.response_status_code = code;
    }

    let rendered = blueprint::render(&collection, &config);
    for skip in &rendered.skipped {
        eprintln!("warning: {skip}");
    }

    fs::write(&options.output, &rendered.markup)
        .map_err(|e| Error::Write(f!("{}: {}", options.output.display(), e)))?;

    if global.verbose {
        println!(
            "Wrote {} ({} bytes, {} item(s) skipped)",
            options.output.display(),
            rendered.markup.len(),
            rendered.skipped.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_collection_missing_file() {
        let err = load_collection(Path::new("/no/such/collection.json")).unwrap_err();
        assert!(matches!(err, Error::Read(_)));
    }

    #[test]
    fn test_load_collection_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{broken").unwrap();

        let err = load_collection(&path).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("collection.json");
        let output = dir.path().join("api.apib");
        fs::write(
            &input,
            r#"{
                "name": "API",
                "item": [
                    {"name": "F1", "item": [
                        {"name": "Get X", "request": {"method": "GET", "url": {"path": ["x"]}}}
                    ]}
                ]
            }"#,
        )
        .unwrap();

        let options = Options {
            input,
            output: output.clone(),
            flat: false,
            response_code: None,
        };
        run(options, crate::Global { verbose: false }).unwrap();

        let markup = fs::read_to_string(&output).unwrap();
        assert!(markup.starts_with("FORMAT: 1A\nHOST: http://localhost\n"));
        assert!(markup.contains("# Group 1.F1"));
        assert!(markup.contains("## Get X [/x]"));
        assert!(markup.contains("+ Response 200 (application/json)"));
    }

    #[test]
    fn test_run_response_code_override() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("collection.json");
        let output = dir.path().join("api.apib");
        fs::write(
            &input,
            r#"{"name": "API", "item": [{"name": "F", "item": [
                {"name": "X", "request": {"method": "GET", "url": {"path": ["x"]}}}
            ]}]}"#,
        )
        .unwrap();

        let options = Options {
            input,
            output: output.clone(),
            flat: false,
            response_code: Some(204),
        };
        run(options, crate::Global { verbose: false }).unwrap();

        let markup = fs::read_to_string(&output).unwrap();
        assert!(markup.contains("+ Response 204 (application/json)"));
    }
}
