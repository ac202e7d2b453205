use super::*;

#[test]
fn skips_malformed_and_blank_lines() {
    let p = parse_coordinates("1.0 2.0\n3.0 x\n\n5.0 6.0");
    assert_eq!(
        p.samples(),
        &[PolarSample::new(1.0, 2.0), PolarSample::new(5.0, 6.0)]
    );
}

#[test]
fn comment_lines_are_excluded_even_with_numbers() {
    let p = parse_coordinates("# comment 1 2\n   # indented 3 4\n0.5 0.25");
    assert_eq!(p.samples(), &[PolarSample::new(0.5, 0.25)]);
}

#[test]
fn extra_tokens_and_mixed_whitespace_are_tolerated() {
    let p = parse_coordinates("  1\t\t2  extra 99\r\n3    4\r\n");
    assert_eq!(
        p.samples(),
        &[PolarSample::new(1.0, 2.0), PolarSample::new(3.0, 4.0)]
    );
}

#[test]
fn single_token_and_nan_lines_are_dropped() {
    let p = parse_coordinates("1\nNaN 1\n1 nan\n2 3");
    assert_eq!(p.samples(), &[PolarSample::new(2.0, 3.0)]);
}

#[test]
fn tokens_are_read_by_their_leading_number() {
    let p = parse_coordinates("1.5abc 2\n0 12px\ninf 1\n0 infinity\n1,5 2");
    assert_eq!(
        p.samples(),
        &[
            PolarSample::new(1.5, 2.0),
            PolarSample::new(0.0, 12.0),
            PolarSample::new(1.0, 2.0)
        ]
    );
}

#[test]
fn only_the_infinity_keyword_is_infinite() {
    let p = parse_coordinates("Infinity 1\n0 -Infinity\n-inf 1\nNaN 2");
    assert_eq!(p.len(), 2);
    assert_eq!(p.get(0).unwrap().theta, f64::INFINITY);
    assert_eq!(p.get(1).unwrap().rho, f64::NEG_INFINITY);
}

#[test]
fn leading_number_prefix_edge_cases() {
    assert_eq!(parse_number(".5x"), Some(0.5));
    assert_eq!(parse_number("5."), Some(5.0));
    assert_eq!(parse_number("-2e3m"), Some(-2000.0));
    assert_eq!(parse_number("3e"), Some(3.0));
    assert_eq!(parse_number("4e+"), Some(4.0));
    assert_eq!(parse_number("0x10"), Some(0.0));
    assert_eq!(parse_number("."), None);
    assert_eq!(parse_number("-"), None);
    assert_eq!(parse_number("+-1"), None);
    assert_eq!(parse_number("abc1"), None);
}

#[test]
fn output_never_exceeds_line_count() {
    let inputs = [
        "",
        "\n\n\n",
        "1 2",
        "1 2\n3 4\n5",
        "# only comments\n#\n",
        "a b\nc d\n1e3 -2.5e-1",
    ];
    for text in inputs {
        let p = parse_coordinates(text);
        assert!(p.len() <= text.lines().count().max(1), "input {text:?}");
    }
}

#[test]
fn scientific_notation_and_signs_parse() {
    let p = parse_coordinates("-2.5 +1e-1");
    assert_eq!(p.samples(), &[PolarSample::new(-2.5, 0.1)]);
}

#[test]
fn read_path_file_reports_missing_file_as_input_error() {
    let err = read_path_file(Path::new("target/definitely/missing.thr")).unwrap_err();
    assert!(matches!(err, TraceError::Input(_)));
}

#[test]
fn read_path_file_replaces_invalid_utf8() {
    let dir = std::path::PathBuf::from("target").join("unit_parse");
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("lossy.thr");
    std::fs::write(&file, b"0 1\n\xff\xfe 2\n1 0\n").unwrap();

    let p = read_path_file(&file).unwrap();
    assert_eq!(
        p.samples(),
        &[PolarSample::new(0.0, 1.0), PolarSample::new(1.0, 0.0)]
    );
}
