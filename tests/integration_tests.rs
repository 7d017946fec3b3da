//! Integration tests for the marcgrep library: decoded text in, selected
//! output blocks out.

use marcgrep::{Query, Record, RecordReader, SearchError};

const DUMP: &str = "001 90021548\n\
                    245 00 $aMise en scène\n\
                    500 00 $aFirst note\n\
                    500 00 $aSecond note\n\
                    500 00 $aThird note\n\
                    \n\
                    001 90021549\n\
                    245 00 $aAnother title\n\
                    700 10 $aSmith, John";

/// Run a query over a dump and collect each selected record's blocks.
fn search(text: &str, query: &Query) -> Vec<Vec<String>> {
    RecordReader::new(text)
        .filter(|record| query.matches(record))
        .map(|record| query.project(&record))
        .collect()
}

#[test]
fn test_field_search_selects_and_projects() {
    let query = Query::new()
        .field_pattern("245", "sc[eèé]ne")
        .unwrap()
        .output_fields(vec!["001".to_string()]);

    assert_eq!(search(DUMP, &query), vec![vec!["001 90021548".to_string()]]);
}

#[test]
fn test_general_search_selects_second_record() {
    let query = Query::new()
        .record_pattern("Smith")
        .unwrap()
        .output_fields(vec!["001".to_string()]);

    assert_eq!(search(DUMP, &query), vec![vec!["001 90021549".to_string()]]);
}

#[test]
fn test_cardinality_search() {
    let query = Query::new()
        .field_count("500", "2+")
        .unwrap()
        .output_fields(vec!["001".to_string()]);
    assert_eq!(search(DUMP, &query), vec![vec!["001 90021548".to_string()]]);

    // "0" selects the record where the field is absent.
    let query = Query::new()
        .field_count("500", "0")
        .unwrap()
        .output_fields(vec!["001".to_string()]);
    assert_eq!(search(DUMP, &query), vec![vec!["001 90021549".to_string()]]);
}

#[test]
fn test_all_groups_combined() {
    let query = Query::new()
        .field_pattern("245", "title")
        .unwrap()
        .record_pattern("Smith")
        .unwrap()
        .field_count("700", "1")
        .unwrap()
        .output_fields(vec!["001".to_string()]);

    assert_eq!(search(DUMP, &query), vec![vec!["001 90021549".to_string()]]);
}

#[test]
fn test_whole_record_output_is_tag_ordered() {
    let text = "700 10 $aName\n001 1\n245 00 $aX";
    let query = Query::new().record_pattern("Name").unwrap();

    assert_eq!(
        search(text, &query),
        vec![vec![
            "001 1".to_string(),
            "245 00 $aX".to_string(),
            "700 10 $aName".to_string(),
        ]]
    );
}

#[test]
fn test_trailing_separator_record_matches_nothing_field_keyed() {
    let text = "001 1\n\n";
    let query = Query::new().field_pattern("001", ".").unwrap();

    // Two records come out of the reader; only the real one is selected.
    assert_eq!(RecordReader::new(text).count(), 2);
    assert_eq!(search(text, &query).len(), 1);
}

#[test]
fn test_records_are_evaluated_in_stream_order() {
    let text = "001 3\n245 00 $ax\n\n001 1\n245 00 $ax\n\n001 2\n245 00 $ax";
    let query = Query::new()
        .field_pattern("245", "x")
        .unwrap()
        .output_fields(vec!["001".to_string()]);

    let ids: Vec<String> = search(text, &query).into_iter().flatten().collect();
    assert_eq!(ids, vec!["001 3", "001 1", "001 2"]);
}

#[test]
fn test_malformed_count_expression_aborts_query_construction() {
    let result = Query::new().field_count("500", "abc");
    match result {
        Err(SearchError::InvalidCount(value)) => assert_eq!(value, "abc"),
        other => panic!("expected InvalidCount, got {other:?}"),
    }
}

#[test]
fn test_reuse_of_query_across_records_is_stable() {
    let query = Query::new()
        .field_pattern("245", "title")
        .unwrap()
        .field_count("500", "0")
        .unwrap();

    let first = search(DUMP, &query);
    let second = search(DUMP, &query);
    assert_eq!(first, second);
}

#[test]
fn test_record_display_roundtrips_sorted_record() {
    let record = Record::parse("001 1\n245 00 $aX\n500 00 $aA\n500 00 $aB");
    assert_eq!(record.to_string(), "001 1\n245 00 $aX\n500 00 $aA\n500 00 $aB");
}
