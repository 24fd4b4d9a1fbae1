use std::io::Cursor;

use donation_analytics::transport::fs::stream_records;
use donation_analytics::{
    ContributionRecord, DonorIdentity, GroupKey, Percentile, RecordError, RecordProcessor,
};

fn line(recipient: &str, name: &str, zip: &str, date: &str, amount: &str, other_id: &str) -> String {
    let mut fields = vec![""; 21];
    fields[0] = recipient;
    fields[7] = name;
    fields[10] = zip;
    fields[13] = date;
    fields[14] = amount;
    fields[15] = other_id;
    fields.join("|")
}

fn processor(p: f64) -> RecordProcessor {
    RecordProcessor::new(Percentile::new(p).unwrap())
}

fn run(p: f64, lines: &[String]) -> Vec<String> {
    let mut processor = processor(p);
    let mut output = Vec::new();
    let input = lines.join("\n");
    stream_records(Cursor::new(input), &mut output, &mut processor).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn smith() -> DonorIdentity {
    DonorIdentity {
        name: "SMITH, JOHN".to_string(),
        zip: "12345".to_string(),
    }
}

#[test]
fn second_contribution_opens_the_group() {
    let output = run(
        50.0,
        &[
            line("C001", "SMITH, JOHN", "123456789", "01152017", "200", ""),
            line("C001", "SMITH, JOHN", "12345", "01202017", "300", ""),
        ],
    );
    assert_eq!(output, vec!["C001|12345|2017|300|300|1"]);
}

#[test]
fn first_record_per_donor_never_emits() {
    let output = run(
        100.0,
        &[
            line("C001", "SMITH, JOHN", "12345", "01152017", "200", ""),
            line("C002", "DOE, JANE", "12345", "01152017", "200", ""),
            line("C001", "SMITH, JOHN", "54321", "01152017", "200", ""),
            line("C003", "ROE, RICH", "99999", "12312018", "5000", ""),
        ],
    );
    assert!(output.is_empty());
}

#[test]
fn stale_year_is_dropped_without_moving_first_seen() {
    let mut processor = processor(50.0);
    let record = |year: i32, amount: i64| ContributionRecord {
        recipient_id: "C001".to_string(),
        donor_name: "SMITH, JOHN".to_string(),
        zip: "12345".to_string(),
        year,
        amount,
    };

    assert!(processor.process(record(2015, 10)).is_none());
    assert!(processor.process(record(2014, 20)).is_none());
    assert_eq!(
        processor.classify(record(2014, 20)),
        Err(RecordError::StaleDonorYear {
            year: 2014,
            first_seen: 2015
        })
    );
    assert_eq!(processor.history().first_seen(&smith()), Some(2015));

    let line = processor.process(record(2016, 30)).unwrap();
    assert_eq!(line.to_string(), "C001|12345|2016|30|30|1");
    assert_eq!(processor.history().first_seen(&smith()), Some(2015));
    assert!(
        processor
            .aggregator()
            .get(&GroupKey {
                recipient_id: "C001".to_string(),
                zip: "12345".to_string(),
                year: 2014,
            })
            .is_none()
    );
}

#[test]
fn other_id_lines_leave_state_untouched() {
    let mut processor = processor(50.0);
    let flagged = line("C001", "SMITH, JOHN", "12345", "01152017", "200", "C00123456");
    assert_eq!(
        processor.process_line(&flagged),
        Err(RecordError::DisqualifyingOtherId)
    );
    assert!(processor.history().is_empty());
    assert!(processor.aggregator().is_empty());

    // The donor is still new afterwards.
    let clean = line("C001", "SMITH, JOHN", "12345", "01152017", "200", "");
    assert_eq!(processor.process_line(&clean), Ok(None));
    assert_eq!(processor.history().first_seen(&smith()), Some(2017));
}

#[test]
fn malformed_lines_are_skipped_and_stream_continues() {
    let output = run(
        50.0,
        &[
            line("C001", "SMITH, JOHN", "12345", "01152017", "200", ""),
            line("C001", "SMITH, JOHN", "1234", "01152017", "200", ""),
            line("C001", "SMITH, JOHN", "12345", "02302017", "200", ""),
            line("C001", "SMITH, JOHN", "12345", "01152017", "lots", ""),
            line("", "SMITH, JOHN", "12345", "01152017", "200", ""),
            line("C001", "", "12345", "01152017", "200", ""),
            "C001|truncated".to_string(),
            line("C001", "SMITH, JOHN", "12345", "01162017", "75.5", ""),
        ],
    );
    assert_eq!(output, vec!["C001|12345|2017|76|76|1"]);
}

#[test]
fn latin1_names_are_not_merged_into_one_donor() {
    let mut input = Vec::new();
    for byte in [0xd1_u8, 0xc1] {
        input.extend_from_slice(b"C001|||||||MU");
        input.push(byte);
        input.extend_from_slice(b"OZ, JOSE|||12345|||01152017|200|\n");
    }
    let mut processor = processor(50.0);
    let mut output = Vec::new();
    stream_records(Cursor::new(input), &mut output, &mut processor).unwrap();

    assert!(output.is_empty());
    assert!(processor.history().is_empty());
    assert_eq!(processor.stats().skipped_for("invalid_encoding"), 2);
}

#[test]
fn each_line_reflects_state_after_its_record() {
    let mut lines = vec![
        line("C00384516", "ABBOTT, JOSEPH", "028956146", "01122017", "250", ""),
        line("C00384516", "SABOURIN, JAMES", "028956146", "01312017", "230", ""),
    ];
    for (amount, date) in [("333", "01122018"), ("384", "01312018"), ("100", "03012018")] {
        lines.push(line("C00384516", "ABBOTT, JOSEPH", "02895", date, amount, ""));
    }
    lines.push(line("C00384516", "SABOURIN, JAMES", "02895", "05052018", "500", ""));

    let output = run(30.0, &lines);
    assert_eq!(
        output,
        vec![
            "C00384516|02895|2018|333|333|1",
            "C00384516|02895|2018|333|717|2",
            "C00384516|02895|2018|100|817|3",
            "C00384516|02895|2018|333|1317|4",
        ]
    );
}

#[test]
fn repeat_donor_feeds_other_recipients_and_years() {
    let output = run(
        50.0,
        &[
            line("C001", "SMITH, JOHN", "12345", "01152016", "100", ""),
            line("C002", "SMITH, JOHN", "12345", "01152017", "40", ""),
            line("C001", "SMITH, JOHN", "12345", "01152016", "60", ""),
            line("C002", "SMITH, JOHN", "12345", "06152017", "80", ""),
        ],
    );
    assert_eq!(
        output,
        vec![
            "C002|12345|2017|40|40|1",
            "C001|12345|2016|60|60|1",
            "C002|12345|2017|40|120|2",
        ]
    );
}
