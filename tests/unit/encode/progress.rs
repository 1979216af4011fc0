use super::*;

#[test]
fn emits_once_per_block_with_percent() {
    let mut p = ProgressParser::new(Some(Duration::from_secs(10)));
    assert_eq!(p.feed("frame=1"), None);
    assert_eq!(p.feed("out_time_us=2500000"), None);
    assert_eq!(p.feed("out_time=00:00:02.500000"), None);
    let ev = p.feed("progress=continue").unwrap();
    assert_eq!(ev.out_time, Duration::from_millis(2500));
    assert_eq!(ev.percent, Some(25.0));

    let ev = p.feed("progress=end").unwrap();
    assert_eq!(ev.percent, Some(100.0));
}

#[test]
fn out_time_ms_is_microseconds_and_na_is_ignored() {
    let mut p = ProgressParser::new(None);
    p.feed("out_time_ms=1000000");
    p.feed("out_time_us=N/A");
    let ev = p.feed("progress=continue").unwrap();
    assert_eq!(ev.out_time, Duration::from_secs(1));
    assert_eq!(ev.percent, None);
}

#[test]
fn percent_is_clamped_and_zero_total_is_unknown() {
    let mut p = ProgressParser::new(Some(Duration::from_secs(1)));
    p.feed("out_time_us=3000000");
    assert_eq!(p.feed("progress=continue").unwrap().percent, Some(100.0));

    let mut p = ProgressParser::new(Some(Duration::ZERO));
    assert_eq!(p.feed("progress=continue").unwrap().percent, None);
}

#[test]
fn garbage_lines_are_ignored() {
    let mut p = ProgressParser::new(None);
    assert_eq!(p.feed(""), None);
    assert_eq!(p.feed("no separator"), None);
}
