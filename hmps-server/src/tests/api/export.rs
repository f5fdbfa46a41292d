use crate::api::export::render_csv;

use hmps_db::Student;

#[test]
fn test_render_csv_header_only_when_empty() {
    let csv = render_csv(&[]);
    assert_eq!(csv, "id,name,email,class_name,created_at\n");
}

#[test]
fn test_render_csv_plain_fields() {
    let mut student = Student::new("Asha Rao");
    student.email = Some("asha@hmps.local".to_string());
    student.class_name = Some("10-A".to_string());

    let csv = render_csv(&[student.clone()]);
    let line = csv.lines().nth(1).unwrap();

    assert!(line.starts_with(&student.id.to_string()));
    assert!(line.contains("Asha Rao"));
    assert!(line.contains("asha@hmps.local"));
    assert!(line.contains("10-A"));
}

#[test]
fn test_render_csv_quotes_fields_with_delimiters() {
    let mut student = Student::new("Rao, Asha \"AR\"");
    student.class_name = Some("10-A".to_string());

    let csv = render_csv(&[student]);
    let line = csv.lines().nth(1).unwrap();

    // Comma and quotes force RFC 4180 quoting
    assert!(line.contains("\"Rao, Asha \"\"AR\"\"\""));
}

#[test]
fn test_render_csv_quotes_fields_with_carriage_return() {
    let mut student = Student::new("Carriage");
    student.class_name = Some("3\r4".to_string());

    let csv = render_csv(&[student]);

    assert!(csv.contains("\"3\r4\""));
}

#[test]
fn test_render_csv_missing_optionals_are_empty_fields() {
    let student = Student::new("Solo");

    let csv = render_csv(&[student]);
    let line = csv.lines().nth(1).unwrap();

    assert!(line.contains(",Solo,,,"));
}
