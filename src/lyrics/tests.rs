use super::*;
use std::fs;

fn times(t: &Timeline) -> Vec<u64> {
    t.lines().iter().map(|l| l.time_ms).collect()
}

#[test]
fn parses_two_simple_lines() {
    let t = parse_timeline("[00:12.50]Hello\n[00:15.00]World");
    assert_eq!(
        t.lines(),
        &[LyricLine::new(12_500, "Hello"), LyricLine::new(15_000, "World")]
    );
}

#[test]
fn fraction_is_right_padded_to_millis() {
    let t = parse_timeline("[00:01.5]a\n[00:02.05]b\n[00:03.123]c\n[00:04]d");
    assert_eq!(times(&t), vec![1_500, 2_050, 3_123, 4_000]);
}

#[test]
fn multiple_tags_expand_and_sort() {
    let t = parse_timeline("[00:30.00][00:10.00]Chorus\n[00:20.00]Verse");
    assert_eq!(times(&t), vec![10_000, 20_000, 30_000]);
    assert_eq!(t.lines()[0].text, "Chorus");
    assert_eq!(t.lines()[1].text, "Verse");
    assert_eq!(t.lines()[2].text, "Chorus");
}

#[test]
fn equal_timestamps_keep_emission_order() {
    let t = parse_timeline("[00:05.00]first\n[00:05.00]second\n[00:01.00]zero");
    let texts: Vec<&str> = t.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["zero", "first", "second"]);
}

#[test]
fn empty_text_gets_placeholder() {
    let t = parse_timeline("[00:05.00]   \n[00:06.00]");
    assert_eq!(t.len(), 2);
    assert!(t.lines().iter().all(|l| l.text == PLACEHOLDER_TEXT));
}

#[test]
fn malformed_and_untimed_lines_are_ignored() {
    let t = parse_timeline(
        "plain text\n[ab:cd]nope\n[00:75.00]bad seconds\n[ar:Someone]\n\n[01:02.03]ok",
    );
    assert_eq!(t.lines(), &[LyricLine::new(62_030, "ok")]);
}

#[test]
fn malformed_fragment_stays_in_text() {
    let t = parse_timeline("[00:01.00]see [x:y] here");
    assert_eq!(t.lines()[0].text, "see [x:y] here");
}

#[test]
fn parsed_timelines_are_sorted() {
    let src = "[02:00]e\n[00:30]b\n[01:00][00:10]c\n[00:45.9]d\n[00:00]a";
    let t = parse_timeline(src);
    assert!(t.lines().windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
}

#[test]
fn header_tags_and_offset_are_read() {
    let doc = parse_document(
        "[ti:Song]\n[ar: Band ]\n[al:]\n[offset:+500]\n[00:01.00]one\n[00:00.20]zero",
    );
    assert_eq!(doc.tags.title.as_deref(), Some("Song"));
    assert_eq!(doc.tags.artist.as_deref(), Some("Band"));
    assert_eq!(doc.tags.album, None);
    assert_eq!(doc.tags.offset_ms, 500);
    assert_eq!(times(&doc.timeline), vec![0, 500]);
}

#[test]
fn negative_offset_delays_lyrics() {
    let doc = parse_document("[offset:-250]\n[00:01.00]one");
    assert_eq!(times(&doc.timeline), vec![1_250]);
}

#[test]
fn colon_fraction_separator_is_accepted() {
    let t = parse_timeline("[00:12:50]Hello");
    assert_eq!(times(&t), vec![12_500]);
}

#[test]
fn crlf_line_endings() {
    let t = parse_timeline("[00:01.00]a\r\n[00:02.00]b\r\n");
    assert_eq!(t.lines()[0].text, "a");
    assert_eq!(t.lines()[1].text, "b");
}

#[test]
fn active_index_scenario() {
    let t = parse_timeline("[00:12.50]Hello\n[00:15.00]World");
    assert_eq!(t.active_index(13_000), Some(0));
    assert_eq!(t.active_index(11_000), None);
    assert_eq!(t.active_index(15_000), Some(1));
    assert_eq!(t.active_index(12_500), Some(0));
    assert_eq!(t.active_index(u64::MAX), Some(1));
}

#[test]
fn active_index_on_empty_timeline() {
    assert_eq!(Timeline::default().active_index(0), None);
    assert_eq!(Timeline::default().active_index(10_000), None);
}

#[test]
fn active_index_matches_linear_scan() {
    let t = Timeline::new(
        [0u64, 100, 100, 250, 250, 250, 900, 1_000]
            .iter()
            .map(|&ms| LyricLine::new(ms, "x"))
            .collect(),
    );
    for pos in 0..1_200u64 {
        let expected = t.lines().iter().rposition(|l| l.time_ms <= pos);
        assert_eq!(t.active_index(pos), expected, "position {pos}");
    }
}

#[test]
fn load_document_reads_file_with_bom() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.lrc");
    fs::write(&path, "\u{feff}[ti:Title]\n[00:01.00]one\n").unwrap();

    let doc = load_document(&path).unwrap();
    assert_eq!(doc.tags.title.as_deref(), Some("Title"));
    assert_eq!(doc.timeline.lines(), &[LyricLine::new(1_000, "one")]);
}

#[test]
fn load_document_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_document(&dir.path().join("missing.lrc")).is_err());
}
