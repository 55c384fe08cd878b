mod common;

use std::fs;

use chrono::{TimeZone, Utc};

use common::{at, date, draft, open_store, setup_data_dir};

#[test]
fn save_then_load_reproduces_the_ledger() {
    let dir = setup_data_dir();
    let (mut store, _) = open_store(&dir);
    let first = store
        .add_student(draft("Asha", "9800000001", "5", date(2024, 1, 15), 500.0), at(2024, 1, 15))
        .unwrap();
    let second = store
        .add_student(draft("Ravi", "9800000002", "LKG", date(2024, 2, 29), 1250.5), at(2024, 2, 29))
        .unwrap();
    store.record_payment(first.id, 500.0, at(2024, 3, 16)).unwrap();
    store.record_payment(second.id, 250.25, at(2024, 3, 17)).unwrap();

    let (reloaded, warnings) = open_store(&dir);
    assert!(warnings.is_empty());
    assert_eq!(reloaded.ledger(), store.ledger());

    let ids: Vec<i64> = reloaded.students().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert_eq!(reloaded.student(second.id).unwrap().class_name, "LKG");
}

#[test]
fn files_use_camel_case_keys() {
    let dir = setup_data_dir();
    let (mut store, _) = open_store(&dir);
    let student = store
        .add_student(draft("Asha", "9800000001", "5", date(2024, 1, 15), 500.0), at(2024, 1, 15))
        .unwrap();
    store.record_payment(student.id, 500.0, at(2024, 3, 16)).unwrap();

    let students = fs::read_to_string(dir.join("students.json")).unwrap();
    for key in ["\"monthlyFee\"", "\"totalPaid\"", "\"admissionDate\"", "\"lastPaymentDate\"", "\"class\""] {
        assert!(students.contains(key), "missing {key}");
    }
    let payments = fs::read_to_string(dir.join("payments.json")).unwrap();
    assert!(payments.contains("\"studentId\""));
}

#[test]
fn corrupt_file_loads_empty_and_is_reported() {
    let dir = setup_data_dir();
    let (mut store, _) = open_store(&dir);
    store
        .add_student(draft("Asha", "9800000001", "5", date(2024, 1, 15), 500.0), at(2024, 1, 15))
        .unwrap();
    fs::write(dir.join("students.json"), "[{\"id\": oops").unwrap();

    let (reloaded, warnings) = open_store(&dir);
    assert!(reloaded.students().is_empty());
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].starts_with("students"));
}

#[test]
fn lenient_amounts_and_orphans_load_with_warnings() {
    let dir = setup_data_dir();
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("students.json"),
        r#"[{"id": 10, "name": "Asha", "phone": "9800000001", "class": "5",
             "monthlyFee": "500", "totalPaid": null, "admissionDate": "2024-01-15",
             "lastPaymentDate": null, "status": "suspended"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("payments.json"),
        r#"[{"id": 11, "studentId": 99, "amount": 20, "date": "2024-03-01T10:00:00Z"}]"#,
    )
    .unwrap();

    let (mut store, warnings) = open_store(&dir);
    let student = store.student(10).unwrap();
    assert_eq!(student.monthly_fee, 500.0);
    assert_eq!(student.total_paid, 0.0);
    assert_eq!(warnings.len(), 1);

    let next = store
        .add_student(
            draft("Ravi", "9800000002", "5", date(2024, 1, 15), 500.0),
            Utc.timestamp_millis_opt(0).unwrap(),
        )
        .unwrap();
    assert_eq!(next.id, 12);
}

#[test]
fn clear_removes_the_files() {
    let dir = setup_data_dir();
    let (mut store, _) = open_store(&dir);
    store
        .add_student(draft("Asha", "9800000001", "5", date(2024, 1, 15), 500.0), at(2024, 1, 15))
        .unwrap();
    assert!(dir.join("students.json").exists());

    store.clear().unwrap();
    assert!(!dir.join("students.json").exists());
    let (reloaded, warnings) = open_store(&dir);
    assert!(reloaded.ledger().is_empty());
    assert!(warnings.is_empty());
}
