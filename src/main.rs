use anyhow::Context;
use clap::{ArgAction, Parser};
use marcgrep::{decoder, Query, RecordReader, SearchError};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marcgrep")]
#[command(about = "Search line-format MARC bibliographic record dumps")]
#[command(version)]
#[command(
    after_help = "example:\n  marcgrep -s 245 \"mise? en sc[eèé]ne\" /data/danbib/870970/2016-01.gz -f 001,245"
)]
struct Args {
    /// Files to search through, plain or gzipped
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Pattern to search for in all fields. ex: "009 00.*?\*am"
    #[arg(short = 'g', long = "general-search", value_name = "PATTERN")]
    general_search: Option<String>,

    /// Search an individual field. ex: -s 009 "\*am". Can be specified any
    /// number of times
    #[arg(
        short = 's',
        long = "search",
        num_args = 2,
        value_names = ["FIELD", "PATTERN"],
        action = ArgAction::Append
    )]
    search: Vec<String>,

    /// Constrain how many lines a field has: N, N+, -N, N-M, or 0 for an
    /// absent field. Can be specified any number of times
    #[arg(
        short = 'c',
        long = "count",
        num_args = 2,
        value_names = ["FIELD", "EXPR"],
        action = ArgAction::Append
    )]
    count: Vec<String>,

    /// Fields to output, separated by commas
    #[arg(short = 'f', long = "fields", value_name = "FIELDS")]
    fields: Option<String>,

    /// Decoder program run over each input file
    #[arg(long, value_name = "PROGRAM", default_value = decoder::DEFAULT_DECODER)]
    decoder: String,
}

impl Args {
    fn validate(&self) -> Result<(), String> {
        if self.search.is_empty() && self.general_search.is_none() && self.count.is_empty() {
            return Err("missing -s, -g or -c".to_string());
        }
        Ok(())
    }
}

fn build_query(args: &Args) -> Result<Query, SearchError> {
    let mut query = Query::new();
    for pair in args.search.chunks(2) {
        query = query.field_pattern(pair[0].as_str(), pair[1].as_str())?;
    }
    if let Some(ref pattern) = args.general_search {
        query = query.record_pattern(pattern)?;
    }
    for pair in args.count.chunks(2) {
        query = query.field_count(pair[0].as_str(), pair[1].as_str())?;
    }
    if let Some(ref fields) = args.fields {
        if !fields.is_empty() {
            query = query.output_fields(fields.split(',').map(str::to_string).collect());
        }
    }
    Ok(query)
}

fn main() {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("marcgrep: {e}");
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        eprintln!("marcgrep: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let query = build_query(args)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for path in &args.files {
        let text = decoder::decode_file(path, &args.decoder)
            .with_context(|| format!("while decoding '{}'", path.display()))?;

        for record in RecordReader::new(&text) {
            if query.matches(&record) {
                for block in query.project(&record) {
                    writeln!(out, "{block}")?;
                }
                // Blank line between records, also after an empty projection.
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("arguments should parse")
    }

    #[test]
    fn test_search_pairs_accumulate() {
        let args = parse_args(&[
            "marcgrep", "-s", "009", r"\*am", "-s", "245", "title", "file.dat",
        ]);
        assert_eq!(args.search, vec!["009", r"\*am", "245", "title"]);
        assert_eq!(args.files, vec![PathBuf::from("file.dat")]);
    }

    #[test]
    fn test_missing_predicate_group_is_rejected() {
        let args = parse_args(&["marcgrep", "file.dat"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_any_single_group_is_accepted() {
        assert!(parse_args(&["marcgrep", "-g", "x", "f"]).validate().is_ok());
        assert!(parse_args(&["marcgrep", "-s", "245", "x", "f"]).validate().is_ok());
        assert!(parse_args(&["marcgrep", "-c", "245", "2+", "f"]).validate().is_ok());
    }

    #[test]
    fn test_groups_combine() {
        let args = parse_args(&[
            "marcgrep", "-g", "x", "-s", "245", "y", "-c", "500", "0", "f",
        ]);
        assert!(args.validate().is_ok());
        assert!(build_query(&args).unwrap().has_predicates());
    }

    #[test]
    fn test_build_query_splits_fields_on_commas() {
        let args = parse_args(&["marcgrep", "-g", "x", "-f", "001,245", "f"]);
        let query = build_query(&args).unwrap();
        let record = marcgrep::Record::parse("245 00 $ax\n001 1\n700 10 $az");
        assert_eq!(query.project(&record), vec!["001 1", "245 00 $ax"]);
    }

    #[test]
    fn test_build_query_empty_fields_means_whole_record() {
        let args = parse_args(&["marcgrep", "-g", "x", "-f", "", "f"]);
        let query = build_query(&args).unwrap();
        let record = marcgrep::Record::parse("245 00 $ax\n001 1");
        assert_eq!(query.project(&record).len(), 2);
    }

    #[test]
    fn test_build_query_rejects_bad_count() {
        let args = parse_args(&["marcgrep", "-c", "500", "abc", "f"]);
        assert!(matches!(
            build_query(&args),
            Err(SearchError::InvalidCount(_))
        ));
    }
}
