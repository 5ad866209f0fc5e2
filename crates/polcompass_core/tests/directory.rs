use polcompass_core::db::open_db_in_memory;
use polcompass_core::{DirectoryService, PageRequest, SqliteSurveyRepository};
use rusqlite::{params, Connection};

fn insert_survey(conn: &Connection, name: &str, description: &str) -> i64 {
    conn.execute(
        "INSERT INTO surveys (axis_a_name, axis_b_name, name, description)
         VALUES ('Economic', 'Social', ?1, ?2);",
        params![name, description],
    )
    .unwrap();
    conn.last_insert_rowid()
}

fn seed_published(conn: &Connection, count: usize) -> Vec<i64> {
    (0..count)
        .map(|i| insert_survey(conn, &format!("Survey {i}"), "Published"))
        .collect()
}

#[test]
fn empty_directory_has_zero_pages() {
    let mut conn = open_db_in_memory().unwrap();
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();

    let page = DirectoryService::new(repo)
        .list_published(PageRequest::new(None, 10).unwrap())
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[test]
fn seven_published_over_pages_of_three() {
    let mut conn = open_db_in_memory().unwrap();
    let ids = seed_published(&conn, 7);
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();
    let service = DirectoryService::new(repo);

    let first = service
        .list_published(PageRequest::new(Some(1), 3).unwrap())
        .unwrap();
    assert_eq!(first.total_pages, 3);
    assert_eq!(
        first.items.iter().map(|item| item.id).collect::<Vec<_>>(),
        ids[..3].to_vec()
    );

    let last = service
        .list_published(PageRequest::new(Some(3), 3).unwrap())
        .unwrap();
    assert_eq!(last.total_pages, 3);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].id, ids[6]);
    assert_eq!(last.items[0].name, "Survey 6");
    assert_eq!(last.items[0].description, "Published");
}

#[test]
fn page_past_the_end_is_empty_with_real_total() {
    let mut conn = open_db_in_memory().unwrap();
    seed_published(&conn, 4);
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();

    let page = DirectoryService::new(repo)
        .list_published(PageRequest::new(Some(9), 2).unwrap())
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 2);
}

#[test]
fn unpublished_surveys_are_skipped() {
    let mut conn = open_db_in_memory().unwrap();
    insert_survey(&conn, "", "No name");
    let published = insert_survey(&conn, "Named", "Described");
    insert_survey(&conn, "No description", "");
    insert_survey(&conn, "", "");
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();

    let page = DirectoryService::new(repo)
        .list_published(PageRequest::new(None, 10).unwrap())
        .unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, published);
}

#[test]
fn largest_page_size_fits_everything_on_one_page() {
    let mut conn = open_db_in_memory().unwrap();
    let ids = seed_published(&conn, 2);
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();

    let page = DirectoryService::new(repo)
        .list_published(PageRequest::new(None, i64::MAX).unwrap())
        .unwrap();
    assert_eq!(page.total_pages, 1);
    assert_eq!(
        page.items.iter().map(|item| item.id).collect::<Vec<_>>(),
        ids
    );
}

#[test]
fn far_page_with_saturated_offset_is_empty() {
    let mut conn = open_db_in_memory().unwrap();
    seed_published(&conn, 3);
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();
    let service = DirectoryService::new(repo);

    let page = service
        .list_published(PageRequest::new(Some(i64::MAX), i64::MAX).unwrap())
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);

    let page = service
        .list_published(PageRequest::new(Some(i64::MAX), 2).unwrap())
        .unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 2);
}

#[test]
fn single_item_pages_over_exact_multiple() {
    let mut conn = open_db_in_memory().unwrap();
    let ids = seed_published(&conn, 4);
    let repo = SqliteSurveyRepository::try_new(&mut conn).unwrap();
    let service = DirectoryService::new(repo);

    for (index, id) in ids.iter().enumerate() {
        let page = service
            .list_published(PageRequest::new(Some(index as i64 + 1), 1).unwrap())
            .unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, *id);
    }

    let beyond = service
        .list_published(PageRequest::new(Some(5), 1).unwrap())
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_pages, 4);
}
