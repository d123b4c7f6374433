//! End-to-end import tests
//!
//! Exercise the per-source entry points against an in-memory catalog and
//! fixture directories, covering name-merge convergence, statement
//! re-import, sentinel boundaries, and bulk replacement.

use std::path::Path;

use csdb_common::db::init::open_in_memory;
use csdb_import::db::{courses, statements, teachable, udemy};
use csdb_import::services::course_mappings::import_course_mappings;
use csdb_import::services::teachable::import_teachable_directory;
use csdb_import::services::udemy::import_udemy_directory;
use sqlx::SqlitePool;
use tempfile::TempDir;

const TEACHABLE_HEADER: &str =
    "id,purchased_at,course_name,final_price,earnings_usd,coupon,user_id,sale_id,user,user_email";

fn write_file(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

/// Fixture directory with one subscription-platform export of two rows.
fn teachable_dir(course_name: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "sales.csv",
        &format!(
            "{TEACHABLE_HEADER}\n\
             101,2024-03-01 10:15:00 UTC,{course_name},49.99,34.99,LAUNCH,7001,9001,Ada,ada@example.com\n\
             102,2024-03-02 11:20:00 UTC,{course_name},49.99,34.99,,7002,9002,Grace,grace@example.com\n"
        ),
    );
    dir
}

/// Fixture directory with one statement file: summary preamble, two
/// transaction rows, then a redemptions section.
fn udemy_dir(course_name: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "statement-march.csv",
        &format!(
            "Statement Summary,March 2024\n\
             Total,123.45\n\
             Transaction Id,Date,User Name,Course Name,Coupon Code,Revenue Channel,Vendor,Price,Transaction Currency,Tax Amount,Store Fee,Share Price,Instructor Share,Tax Rate,Exchange Rate\n\
             5001,2024-03-05,student one,{course_name},UDEMY10,Organic,Udemy,19.99,USD,1.50,4.00,14.49,0.50000,0.08000,1.00000\n\
             5002,2024-03-06,student two,{course_name},,Ads,Udemy,19.99,USD,1.50,4.00,14.49,0.50000,0.08000,1.00000\n\
             Redemptions,,,,,,,,,,,,,,\n\
             9999,2024-03-07,ignored,Ignored Course,,,,,,,,,,,\n"
        ),
    );
    dir
}

async fn pool() -> SqlitePool {
    open_in_memory().await.expect("Failed to open database")
}

#[tokio::test]
async fn merge_converges_teachable_first() {
    let pool = pool().await;
    let t_dir = teachable_dir("Shared Course");
    let u_dir = udemy_dir("Shared Course");

    import_teachable_directory(&pool, t_dir.path()).await.unwrap();
    import_udemy_directory(&pool, u_dir.path()).await.unwrap();

    assert_eq!(courses::count(&pool).await.unwrap(), 1);
    let course = courses::select_by_course_name(&pool, "Shared Course")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(course.teachable_name.as_deref(), Some("Shared Course"));
    assert_eq!(course.udemy_name.as_deref(), Some("Shared Course"));
}

#[tokio::test]
async fn merge_converges_udemy_first() {
    let pool = pool().await;
    let t_dir = teachable_dir("Shared Course");
    let u_dir = udemy_dir("Shared Course");

    import_udemy_directory(&pool, u_dir.path()).await.unwrap();
    import_teachable_directory(&pool, t_dir.path()).await.unwrap();

    assert_eq!(courses::count(&pool).await.unwrap(), 1);
    let course = courses::select_by_course_name(&pool, "Shared Course")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(course.teachable_name.as_deref(), Some("Shared Course"));
    assert_eq!(course.udemy_name.as_deref(), Some("Shared Course"));
}

#[tokio::test]
async fn preseeded_mapping_attaches_both_sources_to_one_course() {
    let pool = pool().await;

    let mapping_dir = tempfile::tempdir().unwrap();
    write_file(
        mapping_dir.path(),
        "mappings.csv",
        "CourseName,Teachable,Udemy\n\
         Intro to X,Intro to X,Intro to X (Udemy Ed.)\n",
    );
    let t_dir = teachable_dir("Intro to X");
    let u_dir = udemy_dir("Intro to X (Udemy Ed.)");

    import_course_mappings(&pool, mapping_dir.path()).await.unwrap();
    import_udemy_directory(&pool, u_dir.path()).await.unwrap();
    import_teachable_directory(&pool, t_dir.path()).await.unwrap();

    // Both imports attached to the pre-seeded row; no new course appeared.
    assert_eq!(courses::count(&pool).await.unwrap(), 1);
    assert_eq!(teachable::count(&pool).await.unwrap(), 2);
    assert_eq!(udemy::count(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn statement_reimport_is_idempotent() {
    let pool = pool().await;
    let u_dir = udemy_dir("Course U");

    import_udemy_directory(&pool, u_dir.path()).await.unwrap();
    let after_first = udemy::count(&pool).await.unwrap();

    import_udemy_directory(&pool, u_dir.path()).await.unwrap();

    assert_eq!(udemy::count(&pool).await.unwrap(), after_first);
    assert_eq!(statements::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn reimported_statement_rows_belong_to_the_new_ledger_entry() {
    let pool = pool().await;
    let u_dir = udemy_dir("Course U");

    import_udemy_directory(&pool, u_dir.path()).await.unwrap();
    let first = statements::select_by_file_name(&pool, "statement-march.csv")
        .await
        .unwrap()
        .unwrap();

    import_udemy_directory(&pool, u_dir.path()).await.unwrap();
    let second = statements::select_by_file_name(&pool, "statement-march.csv")
        .await
        .unwrap()
        .unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(udemy::count_for_statement(&pool, first.id).await.unwrap(), 0);
    assert_eq!(udemy::count_for_statement(&pool, second.id).await.unwrap(), 2);
}

#[tokio::test]
async fn rows_outside_the_transaction_section_are_never_imported() {
    let pool = pool().await;
    let u_dir = udemy_dir("Course U");

    import_udemy_directory(&pool, u_dir.path()).await.unwrap();

    // Only the two rows between the markers landed; the preamble, the
    // redemptions marker, and the trailing row did not.
    assert_eq!(udemy::count(&pool).await.unwrap(), 2);
    assert!(courses::select_by_course_name(&pool, "Ignored Course")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn teachable_reimport_replaces_instead_of_duplicating() {
    let pool = pool().await;
    let t_dir = teachable_dir("Course T");

    import_teachable_directory(&pool, t_dir.path()).await.unwrap();
    import_teachable_directory(&pool, t_dir.path()).await.unwrap();

    // Two rows in the directory, two rows in the store.
    assert_eq!(teachable::count(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn multiple_teachable_files_import_in_one_replacement_pass() {
    let pool = pool().await;

    let dir = tempfile::tempdir().unwrap();
    write_file(
        dir.path(),
        "a.csv",
        &format!("{TEACHABLE_HEADER}\n201,2024-01-05 09:00:00 UTC,Course A,10.00,7.00,,1,1,A,a@example.com\n"),
    );
    write_file(
        dir.path(),
        "b.csv",
        &format!("{TEACHABLE_HEADER}\n202,2024-01-06 09:00:00 UTC,Course B,10.00,7.00,,2,2,B,b@example.com\n"),
    );

    import_teachable_directory(&pool, dir.path()).await.unwrap();

    assert_eq!(teachable::count(&pool).await.unwrap(), 2);
    assert_eq!(courses::count(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn missing_source_directory_aborts_the_run() {
    let pool = pool().await;

    let result = import_udemy_directory(&pool, Path::new("/nonexistent/statements")).await;
    assert!(result.is_err());
}
