//! Course catalog operations
//!
//! Home of the two-key name merge: a course sighted under either naming
//! system converges onto a single catalog row carrying both external names,
//! regardless of which source was imported first.

use csdb_common::db::models::Course;
use csdb_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Which naming system a source-specific course name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSide {
    Teachable,
    Udemy,
}

impl NameSide {
    /// Column in `courses` holding this side's external name.
    fn column(self) -> &'static str {
        match self {
            NameSide::Teachable => "teachableName",
            NameSide::Udemy => "udemyName",
        }
    }

    fn other(self) -> NameSide {
        match self {
            NameSide::Teachable => NameSide::Udemy,
            NameSide::Udemy => NameSide::Teachable,
        }
    }
}

fn course_from_row(row: &SqliteRow) -> Course {
    Course {
        id: row.get("id"),
        course_name: row.get("courseName"),
        teachable_name: row.get("teachableName"),
        udemy_name: row.get("udemyName"),
    }
}

async fn select_by_side(
    conn: &mut SqliteConnection,
    side: NameSide,
    name: &str,
) -> Result<Option<Course>> {
    let sql = format!(
        "SELECT id, courseName, teachableName, udemyName FROM courses WHERE {} = ?",
        side.column()
    );
    let row = sqlx::query(&sql).bind(name).fetch_optional(conn).await?;
    Ok(row.as_ref().map(course_from_row))
}

/// Resolve or create the catalog row owning `name` on the given side.
///
/// Resolution order:
/// 1. direct hit on this side's column, used unchanged;
/// 2. cross-reference hit on the other side's column, in which case this
///    side's name is attached to that row so future lookups hit directly;
/// 3. no row under either system, in which case a new course is created
///    with only this side's column populated.
///
/// The whole lookup-then-write sequence runs in one transaction, so two
/// concurrent resolutions of the same name cannot create duplicate rows.
pub async fn resolve_course(pool: &SqlitePool, side: NameSide, name: &str) -> Result<Course> {
    let mut tx = pool.begin().await?;

    if let Some(course) = select_by_side(&mut *tx, side, name).await? {
        tx.commit().await?;
        return Ok(course);
    }

    // Seen before under the other naming system: attach this side's name.
    if let Some(mut course) = select_by_side(&mut *tx, side.other(), name).await? {
        let sql = format!("UPDATE courses SET {} = ? WHERE id = ?", side.column());
        sqlx::query(&sql)
            .bind(name)
            .bind(course.id)
            .execute(&mut *tx)
            .await?;
        match side {
            NameSide::Teachable => course.teachable_name = Some(name.to_string()),
            NameSide::Udemy => course.udemy_name = Some(name.to_string()),
        }
        tx.commit().await?;
        return Ok(course);
    }

    // First sighting under either system.
    let (teachable_name, udemy_name) = match side {
        NameSide::Teachable => (Some(name), None),
        NameSide::Udemy => (None, Some(name)),
    };
    let result =
        sqlx::query("INSERT INTO courses (courseName, teachableName, udemyName) VALUES (?, ?, ?)")
            .bind(name)
            .bind(teachable_name)
            .bind(udemy_name)
            .execute(&mut *tx)
            .await?;
    tx.commit().await?;

    Ok(Course {
        id: result.last_insert_rowid(),
        course_name: Some(name.to_string()),
        teachable_name: teachable_name.map(str::to_string),
        udemy_name: udemy_name.map(str::to_string),
    })
}

/// Load a course by its display name.
pub async fn select_by_course_name(pool: &SqlitePool, name: &str) -> Result<Option<Course>> {
    let row =
        sqlx::query("SELECT id, courseName, teachableName, udemyName FROM courses WHERE courseName = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    Ok(row.as_ref().map(course_from_row))
}

/// Insert a pre-seeded course row, bypassing the merge.
pub async fn insert_course(
    pool: &SqlitePool,
    course_name: &str,
    teachable_name: Option<&str>,
    udemy_name: Option<&str>,
) -> Result<Course> {
    let result =
        sqlx::query("INSERT INTO courses (courseName, teachableName, udemyName) VALUES (?, ?, ?)")
            .bind(course_name)
            .bind(teachable_name)
            .bind(udemy_name)
            .execute(pool)
            .await?;

    Ok(Course {
        id: result.last_insert_rowid(),
        course_name: Some(course_name.to_string()),
        teachable_name: teachable_name.map(str::to_string),
        udemy_name: udemy_name.map(str::to_string),
    })
}

/// Count catalog rows.
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
