//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, Utc};
use worklog_core::{
  store::{Order, Page, Repository, Store},
  task::{NewTask, Task, TaskPatch},
  work::{NewWork, Work, WorkPatch},
};

use crate::{Error, Location, SqliteStore, parse_url};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_work(tag: &str) -> NewWork {
  NewWork {
    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    tag:  tag.into(),
    todo: "wash car".into(),
    done: String::new(),
  }
}

fn new_task(name: &str) -> NewTask {
  NewTask {
    name: name.into(),
    link: None,
    kind: Some("ops".into()),
    done: None,
    todo: Some("write notes".into()),
  }
}

async fn count_works(s: &SqliteStore) -> usize {
  let page = Page { limit: 10_000, ..Page::default() };
  Repository::<Work>::read_all(s, page).await.unwrap().len()
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_timestamp() {
  let s = store().await;

  let before = Utc::now();
  let work: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();
  let after = Utc::now();

  assert!(work.id > 0);
  assert!(work.date_created >= before && work.date_created <= after);
  assert_eq!(work.tag, "chore");
  assert_eq!(work.done, "");
}

#[tokio::test]
async fn create_never_repeats_an_id() {
  let s = store().await;
  let a: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();
  let b: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn read_round_trips_created_entity() {
  let s = store().await;
  let created: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();

  let fetched: Option<Work> = Repository::<Work>::read(&s, created.id).await.unwrap();
  assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn read_missing_returns_none() {
  let s = store().await;
  let fetched: Option<Work> = Repository::<Work>::read(&s, 42).await.unwrap();
  assert!(fetched.is_none());
}

#[tokio::test]
async fn task_round_trips_optional_columns() {
  let s = store().await;
  let created: Task = Repository::<Task>::create(&s, new_task("release")).await.unwrap();
  assert_eq!(created.date_created, created.last_update);

  let fetched: Task = Repository::<Task>::read(&s, created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
  assert!(fetched.link.is_none());
  assert_eq!(fetched.kind.as_deref(), Some("ops"));
}

#[tokio::test]
async fn entity_tables_are_independent() {
  let s = store().await;
  let work: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();
  let task: Task = Repository::<Task>::create(&s, new_task("release")).await.unwrap();

  assert_eq!(work.id, 1);
  assert_eq!(task.id, 1);
  let tasks: Vec<Task> = Repository::<Task>::read_all(&s, Page::default()).await.unwrap();
  assert_eq!(tasks.len(), 1);
}

// ─── Read all ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn read_all_empty_store() {
  let s = store().await;
  let works: Vec<Work> = Repository::<Work>::read_all(&s, Page::default()).await.unwrap();
  assert!(works.is_empty());
}

#[tokio::test]
async fn read_all_respects_limit_and_offset() {
  let s = store().await;
  for tag in ["a", "b", "c", "d"] {
    let _: Work = Repository::<Work>::create(&s, new_work(tag)).await.unwrap();
  }

  let first: Vec<Work> = Repository::<Work>::read_all(
    &s,
    Page { offset: 0, limit: 3, order: Order::Insertion },
  )
  .await
  .unwrap();
  assert_eq!(first.len(), 3);
  assert_eq!(first[0].tag, "a");

  let rest: Vec<Work> = Repository::<Work>::read_all(
    &s,
    Page { offset: 3, limit: 3, order: Order::Insertion },
  )
  .await
  .unwrap();
  assert_eq!(rest.len(), 1);
  assert_eq!(rest[0].tag, "d");

  let all: Vec<Work> = Repository::<Work>::read_all(
    &s,
    Page { offset: 0, limit: 50, order: Order::Insertion },
  )
  .await
  .unwrap();
  assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn read_all_newest_first() {
  let s = store().await;
  for tag in ["first", "second", "third"] {
    let _: Work = Repository::<Work>::create(&s, new_work(tag)).await.unwrap();
  }

  let works: Vec<Work> = Repository::<Work>::read_all(&s, Page::newest_first()).await.unwrap();
  let tags: Vec<&str> = works.iter().map(|w| w.tag.as_str()).collect();
  assert_eq!(tags, ["third", "second", "first"]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_changes_only_supplied_fields() {
  let s = store().await;
  let created: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();

  let patch = WorkPatch { done: Some("washed".into()), ..Default::default() };
  let updated: Work = Repository::<Work>::update(&s, created.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.done, "washed");
  assert_eq!(updated.tag, created.tag);
  assert_eq!(updated.todo, created.todo);
  assert_eq!(updated.date, created.date);
  assert_eq!(updated.date_created, created.date_created);

  let fetched: Work = Repository::<Work>::read(&s, created.id).await.unwrap().unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_refreshes_task_last_update() {
  let s = store().await;
  let created: Task = Repository::<Task>::create(&s, new_task("release")).await.unwrap();

  let patch = TaskPatch { link: Some("https://example.com".into()), ..Default::default() };
  let updated: Task = Repository::<Task>::update(&s, created.id, patch).await.unwrap().unwrap();

  assert!(updated.last_update >= created.last_update);
  assert_eq!(updated.date_created, created.date_created);
  assert_eq!(updated.link.as_deref(), Some("https://example.com"));
  assert_eq!(updated.todo, created.todo);
}

#[tokio::test]
async fn update_missing_writes_nothing() {
  let s = store().await;
  let _: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();

  let patch = WorkPatch { tag: Some("other".into()), ..Default::default() };
  let result: Option<Work> = Repository::<Work>::update(&s, 99, patch).await.unwrap();
  assert!(result.is_none());

  let works: Vec<Work> = Repository::<Work>::read_all(&s, Page::default()).await.unwrap();
  assert_eq!(works.len(), 1);
  assert_eq!(works[0].tag, "chore");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_returns_snapshot_then_none() {
  let s = store().await;
  let created: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();

  let first: Option<Work> = Repository::<Work>::delete(&s, created.id).await.unwrap();
  assert_eq!(first, Some(created.clone()));

  let second: Option<Work> = Repository::<Work>::delete(&s, created.id).await.unwrap();
  assert!(second.is_none());

  let gone: Option<Work> = Repository::<Work>::read(&s, created.id).await.unwrap();
  assert!(gone.is_none());
}

#[tokio::test]
async fn delete_missing_leaves_rows_alone() {
  let s = store().await;
  let _: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();

  let result: Option<Work> = Repository::<Work>::delete(&s, 1234).await.unwrap();
  assert!(result.is_none());
  assert_eq!(count_works(&s).await, 1);
}

#[tokio::test]
async fn deleted_ids_are_not_reused() {
  let s = store().await;
  let a: Work = Repository::<Work>::create(&s, new_work("a")).await.unwrap();
  let b: Work = Repository::<Work>::create(&s, new_work("b")).await.unwrap();
  let _: Option<Work> = Repository::<Work>::delete(&s, b.id).await.unwrap();

  let c: Work = Repository::<Work>::create(&s, new_work("c")).await.unwrap();
  assert!(c.id > b.id);
  assert_ne!(c.id, a.id);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_reachable_store() {
  let s = store().await;
  s.ping().await.unwrap();
}

#[tokio::test]
async fn closed_store_is_unavailable() {
  let s = store().await;
  let handle = s.clone();
  s.close().await.unwrap();

  assert!(matches!(handle.ping().await, Err(Error::Unavailable(_))));
  let result = Repository::<Work>::create(&handle, new_work("late")).await;
  assert!(matches!(result, Err(Error::Unavailable(_))));
}

#[tokio::test]
async fn open_url_memory() {
  let s = SqliteStore::open_url("sqlite://").await.unwrap();
  let _: Work = Repository::<Work>::create(&s, new_work("chore")).await.unwrap();
  assert_eq!(count_works(&s).await, 1);
}

#[test]
fn parse_url_variants() {
  assert_eq!(parse_url("sqlite://").unwrap(), Location::Memory);
  assert_eq!(parse_url("sqlite:///:memory:").unwrap(), Location::Memory);
  assert_eq!(parse_url(":memory:").unwrap(), Location::Memory);
  assert_eq!(
    parse_url("sqlite:///database_dailywork.db").unwrap(),
    Location::File("database_dailywork.db".into()),
  );
  assert_eq!(
    parse_url("sqlite:////var/lib/work.db").unwrap(),
    Location::File("/var/lib/work.db".into()),
  );
  assert_eq!(parse_url("work.db").unwrap(), Location::File("work.db".into()));
  assert!(matches!(
    parse_url("postgresql://user:pw@db:5432/work"),
    Err(Error::UnsupportedUrl(_)),
  ));
}
