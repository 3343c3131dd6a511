use barmaster_core::db::open_db_in_memory;
use barmaster_core::repo::codec::job_to_record;
use barmaster_core::{
    ClaimPolicy, Job, JobBoard, JobError, JobStatus, MemoryRecordStore, NewJob, Record,
    RecordStore, SqliteRecordStore, Table,
};

fn posting(title: &str) -> NewJob {
    NewJob {
        title: title.to_string(),
        date: "2026-11-14".to_string(),
        location: "Taipei".to_string(),
        budget: "NT$5000".to_string(),
    }
}

fn seed_two_open_jobs(store: &impl RecordStore) {
    for (id, title) in [(101, "Wedding bar"), (102, "Rooftop pop-up")] {
        store
            .append(Table::Jobs, &job_to_record(&Job::open(id, posting(title))))
            .unwrap();
    }
}

fn ids(jobs: &[Job]) -> Vec<u64> {
    jobs.iter().map(|job| job.id).collect()
}

#[test]
fn claim_moves_job_from_open_list_to_claimant_list() {
    let store = MemoryRecordStore::new();
    seed_two_open_jobs(&store);
    let board = JobBoard::new(&store);

    let outcome = board.claim(101, "leo").unwrap();
    assert_eq!(outcome.job.status, JobStatus::Taken);
    assert_eq!(outcome.job.taker.as_deref(), Some("leo"));
    assert_eq!(outcome.overwritten_taker, None);

    assert_eq!(ids(&board.list_open().unwrap()), vec![102]);
    assert_eq!(ids(&board.list_claimed_by("leo").unwrap()), vec![101]);
    assert!(board.list_claimed_by("ana").unwrap().is_empty());

    let stored = board.get(101).unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::Taken);
    assert_eq!(stored.taker.as_deref(), Some("leo"));
}

#[test]
fn claim_on_sqlite_store_writes_status_and_taker() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    seed_two_open_jobs(&store);
    let board = JobBoard::new(&store);

    board.claim(102, "ana").unwrap();

    let (status, taker): (String, String) = conn
        .query_row(
            "SELECT status, taker FROM jobs WHERE id = 102;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(status, "Taken");
    assert_eq!(taker, "ana");
    assert_eq!(ids(&board.list_open().unwrap()), vec![101]);
}

#[test]
fn claim_unknown_job_is_not_found() {
    let store = MemoryRecordStore::new();
    seed_two_open_jobs(&store);
    let board = JobBoard::new(&store);

    let err = board.claim(999, "leo").unwrap_err();
    assert!(matches!(err, JobError::NotFound(999)));
    assert_eq!(ids(&board.list_open().unwrap()), vec![101, 102]);
}

#[test]
fn claim_rejects_blank_identity() {
    let store = MemoryRecordStore::new();
    seed_two_open_jobs(&store);
    let board = JobBoard::new(&store);

    assert!(matches!(
        board.claim(101, "  "),
        Err(JobError::InvalidIdentity)
    ));
    assert!(board.get(101).unwrap().unwrap().is_open());
}

#[test]
fn second_claim_overwrites_taker_under_last_write_wins() {
    let store = MemoryRecordStore::new();
    seed_two_open_jobs(&store);
    let board = JobBoard::with_policy(&store, ClaimPolicy::LastWriteWins);

    board.claim(101, "leo").unwrap();
    let second = board.claim(101, "ana").unwrap();
    assert_eq!(second.overwritten_taker.as_deref(), Some("leo"));

    let job = board.get(101).unwrap().unwrap();
    assert_eq!(job.taker.as_deref(), Some("ana"));
    assert!(board.list_claimed_by("leo").unwrap().is_empty());
    assert_eq!(ids(&board.list_claimed_by("ana").unwrap()), vec![101]);
}

#[test]
fn require_open_refuses_to_overwrite_a_claim() {
    let store = MemoryRecordStore::new();
    seed_two_open_jobs(&store);
    let board = JobBoard::with_policy(&store, ClaimPolicy::RequireOpen);

    board.claim(101, "leo").unwrap();
    let err = board.claim(101, "ana").unwrap_err();
    match err {
        JobError::AlreadyTaken { id, taker } => {
            assert_eq!(id, 101);
            assert_eq!(taker, "leo");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
        board.get(101).unwrap().unwrap().taker.as_deref(),
        Some("leo")
    );
}

#[test]
fn listings_keep_board_order_and_skip_malformed_rows() {
    let store = MemoryRecordStore::new();
    store
        .append(Table::Jobs, &job_to_record(&Job::open(205, posting("late"))))
        .unwrap();
    store
        .append(
            Table::Jobs,
            &Record::new().with("id", "not-a-number").with("status", "Open"),
        )
        .unwrap();
    store
        .append(Table::Jobs, &job_to_record(&Job::open(110, posting("early"))))
        .unwrap();
    let board = JobBoard::new(&store);

    assert_eq!(ids(&board.list_open().unwrap()), vec![205, 110]);
    assert_eq!(board.list_all().unwrap().len(), 2);
}

#[test]
fn post_assigns_next_id_and_starts_open() {
    let store = MemoryRecordStore::new();
    let board = JobBoard::new(&store);

    let first = board.post(posting("Brunch service")).unwrap();
    assert_eq!(first.id, 101);
    assert!(first.is_open());

    let second = board.post(posting("Tasting night")).unwrap();
    assert_eq!(second.id, 102);
    assert_eq!(ids(&board.list_open().unwrap()), vec![101, 102]);

    assert!(matches!(
        board.post(posting(" ")),
        Err(JobError::InvalidPosting("title"))
    ));
}

fn padded_id_row() -> Record {
    job_to_record(&Job::open(101, posting("Wedding bar"))).with("id", " 101 ")
}

#[test]
fn job_listed_with_padded_id_can_be_claimed() {
    let store = MemoryRecordStore::new();
    store.append(Table::Jobs, &padded_id_row()).unwrap();
    let board = JobBoard::new(&store);

    assert_eq!(ids(&board.list_open().unwrap()), vec![101]);
    let outcome = board.claim(101, "leo").unwrap();
    assert_eq!(outcome.job.taker.as_deref(), Some("leo"));
    assert!(board.list_open().unwrap().is_empty());
    assert_eq!(ids(&board.list_claimed_by("leo").unwrap()), vec![101]);
}

#[test]
fn sqlite_job_with_text_id_can_be_claimed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteRecordStore::try_new(&conn).unwrap();
    store.append(Table::Jobs, &padded_id_row()).unwrap();
    let board = JobBoard::new(&store);

    assert_eq!(ids(&board.list_open().unwrap()), vec![101]);
    board.claim(101, "ana").unwrap();
    assert!(board.list_open().unwrap().is_empty());
    assert_eq!(board.get(101).unwrap().unwrap().taker.as_deref(), Some("ana"));
}
