//! Listing normalization, pagination and ordering over the in-memory store.

use bookshelf::app::library_service::ListPage;
use bookshelf::domain::listing::{
    ListParams, ListQuery, Pagination, SortDir, SortKey, DEFAULT_PAGE_SIZE, PAGE_SIZES,
};
use bookshelf::transport::http::views::BookListPage;
use bookshelf::storage::{BookRepository, InMemoryBookRepository};
use bookshelf::{Book, LibraryService, NewBook, Status};
use std::cmp::Ordering;
use std::sync::Arc;

fn params(pairs: &[(&str, &str)]) -> ListParams {
    let mut p = ListParams::default();
    for (k, v) in pairs {
        let v = Some(v.to_string());
        match *k {
            "q" => p.q = v,
            "status" => p.status = v,
            "sort" => p.sort = v,
            "dir" => p.dir = v,
            "page" => p.page = v,
            "page_size" => p.page_size = v,
            other => panic!("unknown param {}", other),
        }
    }
    p
}

#[test]
fn defaults_when_nothing_is_given() {
    let q = ListParams::default().normalize(None);
    assert_eq!(q.sort, SortKey::Created);
    assert_eq!(q.dir, SortDir::Desc);
    assert_eq!(q.page, 1);
    assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(q.filter.search, None);
    assert_eq!(q.filter.status, None);
    assert!(!q.remember_page_size);
}

#[test]
fn sort_key_domain() {
    for key in SortKey::ALL {
        let q = params(&[("sort", key.as_str())]).normalize(None);
        assert_eq!(q.sort, key);
    }
    for bad in ["", "price", "TITLE", "created_at", "id"] {
        let q = params(&[("sort", bad)]).normalize(None);
        assert_eq!(q.sort, SortKey::Created, "input {:?}", bad);
    }
}

#[test]
fn direction_domain() {
    assert_eq!(params(&[("dir", "asc")]).normalize(None).dir, SortDir::Asc);
    assert_eq!(params(&[("dir", "desc")]).normalize(None).dir, SortDir::Desc);
    for bad in ["", "up", "ASC", "descending"] {
        assert_eq!(params(&[("dir", bad)]).normalize(None).dir, SortDir::Desc, "input {:?}", bad);
    }
}

#[test]
fn status_filter_domain() {
    for st in Status::ALL {
        let q = params(&[("status", st.as_str())]).normalize(None);
        assert_eq!(q.filter.status, Some(st));
    }
    for bad in ["", "All", "finished", "Abandoned"] {
        assert_eq!(params(&[("status", bad)]).normalize(None).filter.status, None, "input {:?}", bad);
    }
}

#[test]
fn search_is_trimmed_and_blank_means_none() {
    assert_eq!(params(&[("q", "  dune ")]).normalize(None).filter.search.as_deref(), Some("dune"));
    assert_eq!(params(&[("q", "   ")]).normalize(None).filter.search, None);
}

#[test]
fn page_number_domain() {
    assert_eq!(params(&[("page", "3")]).normalize(None).page, 3);
    for bad in ["0", "-1", "abc", "", "1.5"] {
        assert_eq!(params(&[("page", bad)]).normalize(None).page, 1, "input {:?}", bad);
    }
}

#[test]
fn page_size_precedence() {
    for n in PAGE_SIZES {
        let q = params(&[("page_size", &n.to_string())]).normalize(Some("50"));
        assert_eq!(q.page_size, n);
        assert!(q.remember_page_size);
    }

    // Invalid explicit value falls through to the stored preference, then the default.
    let q = params(&[("page_size", "7")]).normalize(Some("20"));
    assert_eq!(q.page_size, 20);
    assert!(!q.remember_page_size);

    let q = params(&[("page_size", "7")]).normalize(None);
    assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);

    let q = ListParams::default().normalize(Some("5"));
    assert_eq!(q.page_size, 5);
    assert!(!q.remember_page_size);

    let q = ListParams::default().normalize(Some("1000"));
    assert_eq!(q.page_size, DEFAULT_PAGE_SIZE);
}

#[test]
fn repeated_pairs_keep_the_first_value() {
    let p = ListParams::from_pairs([
        ("status", "Finished"),
        ("status", "Reading"),
        ("page", "2"),
        ("page", "3"),
        ("utm_source", "mail"),
    ]);
    assert_eq!(p.status.as_deref(), Some("Finished"));
    assert_eq!(p.page.as_deref(), Some("2"));
    assert_eq!(p.sort, None);

    let q = p.normalize(None);
    assert_eq!(q.filter.status, Some(Status::Finished));
    assert_eq!(q.page, 2);
}

#[test]
fn page_window_keeps_seven_links_at_both_ends() {
    let window = |page: u32, total_pages: u32| -> Vec<u32> {
        let pagination = Pagination::clamp(page, 10, i64::from(total_pages) * 10);
        let listed = ListPage {
            books: Vec::new(),
            query: ListQuery { page, ..ListQuery::default() },
            pagination,
        };
        BookListPage::new(&listed, None).pages.iter().map(|l| l.number).collect()
    };
    assert_eq!(window(10, 10), (4..=10).collect::<Vec<_>>());
    assert_eq!(window(9, 10), (4..=10).collect::<Vec<_>>());
    assert_eq!(window(1, 10), (1..=7).collect::<Vec<_>>());
    assert_eq!(window(5, 10), (2..=8).collect::<Vec<_>>());
    assert_eq!(window(2, 3), vec![1, 2, 3]);
    assert_eq!(window(1, 1), vec![1]);
}

#[test]
fn pagination_clamps() {
    let p = Pagination::clamp(99, 10, 30);
    assert_eq!((p.page, p.total_pages), (3, 3));
    assert_eq!(p.offset(), 20);
    assert!(!p.has_next());
    assert!(p.has_prev());

    let p = Pagination::clamp(4, 10, 31);
    assert_eq!((p.page, p.total_pages), (4, 4));
    assert_eq!((p.first_item(), p.last_item()), (31, 31));

    let empty = Pagination::clamp(5, 10, 0);
    assert_eq!((empty.page, empty.total_pages), (1, 1));
    assert_eq!((empty.first_item(), empty.last_item()), (0, 0));
    assert_eq!(empty.offset(), 0);
}

#[test]
fn links_keep_filters() {
    let q = params(&[("q", "le guin"), ("status", "Finished"), ("page_size", "20")]).normalize(None);
    assert_eq!(
        q.page_href(2),
        "/books?q=le+guin&status=Finished&sort=created&dir=desc&page=2&page_size=20"
    );
    // Re-clicking the active column flips the direction and resets the page.
    let q = params(&[("sort", "year"), ("dir", "asc"), ("page", "3")]).normalize(None);
    assert!(q.sort_href(SortKey::Year).contains("sort=year&dir=desc&page=1"));
    assert!(q.sort_href(SortKey::Title).contains("sort=title&dir=asc"));
}

fn primary(a: &Book, b: &Book, key: SortKey) -> Option<Ordering> {
    match key {
        SortKey::Title => Some(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortKey::Author => Some(a.author.to_lowercase().cmp(&b.author.to_lowercase())),
        SortKey::Year => Some(a.year.cmp(&b.year)),
        SortKey::Created => Some(a.created_at.cmp(&b.created_at)),
        SortKey::Rating => match (a.rating, b.rating) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => None,
        },
    }
}

fn extra(title: &str, year: i32, rating: Option<i32>) -> NewBook {
    NewBook {
        title: title.to_string(),
        author: "Tie Breaker".to_string(),
        genre: "Testing".to_string(),
        year,
        status: Status::Unread,
        rating,
        image_url: String::new(),
    }
}

async fn seeded_service() -> LibraryService {
    let repo = Arc::new(InMemoryBookRepository::new());
    repo.seed_if_empty().await.unwrap();
    // Force ties on every sort key.
    repo.create(&extra("Dune", 1965, Some(5))).await.unwrap();
    repo.create(&extra("dune", 1965, None)).await.unwrap();
    LibraryService::new(repo)
}

#[tokio::test]
async fn results_are_totally_ordered_for_every_key_and_direction() {
    let service = seeded_service().await;
    for key in SortKey::ALL {
        for dir in [SortDir::Asc, SortDir::Desc] {
            let p = params(&[("sort", key.as_str()), ("dir", dir.as_str()), ("page_size", "50")]);
            let page = service.list(&p, None).await.unwrap();
            assert_eq!(page.books.len(), 32);

            for w in page.books.windows(2) {
                let (a, b) = (&w[0], &w[1]);
                match primary(a, b, key) {
                    Some(Ordering::Equal) => assert!(a.id > b.id, "{:?} {:?} tie not id desc", key, dir),
                    Some(o) => {
                        let want = if dir == SortDir::Asc { Ordering::Less } else { Ordering::Greater };
                        assert_eq!(o, want, "{:?} {:?}: {} before {}", key, dir, a.title, b.title);
                    }
                    // Rating with a NULL: unrated rows come last, ties by id.
                    None => match (a.rating, b.rating) {
                        (Some(_), None) => {}
                        (None, None) => assert!(a.id > b.id),
                        _ => panic!("{:?} {:?}: unrated book before rated one", key, dir),
                    },
                }
            }
        }
    }
}

#[tokio::test]
async fn seeded_rows_share_one_timestamp() {
    let repo = InMemoryBookRepository::new();
    repo.seed_if_empty().await.unwrap();
    let query = ListQuery {
        sort: SortKey::Created,
        dir: SortDir::Asc,
        page_size: 50,
        ..ListQuery::default()
    };
    let books = repo.list(&query, 50, 0).await.unwrap();
    assert!(books.windows(2).all(|w| w[0].created_at == w[1].created_at));
    // Equal timestamps fall back to id DESC, as in Postgres.
    let ids: Vec<i64> = books.iter().map(|b| b.id).collect();
    assert_eq!(ids, (1..=30).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn pages_partition_the_result() {
    let service = seeded_service().await;
    let mut seen = Vec::new();
    for page in 1..=7 {
        let p = params(&[("sort", "title"), ("dir", "asc"), ("page", &page.to_string()), ("page_size", "5")]);
        let listed = service.list(&p, None).await.unwrap();
        assert_eq!(listed.pagination.total_pages, 7);
        seen.extend(listed.books.into_iter().map(|b| b.id));
    }
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 32);
}

#[tokio::test]
async fn out_of_range_page_shows_the_last_page() {
    let service = seeded_service().await;
    let page = service.list(&params(&[("page", "40")]), None).await.unwrap();
    assert_eq!(page.pagination.page, 4);
    assert_eq!(page.query.page, 4);
    assert_eq!(page.books.len(), 2);
}

#[tokio::test]
async fn search_and_status_filters() {
    let repo = Arc::new(InMemoryBookRepository::new());
    repo.seed_if_empty().await.unwrap();
    let service = LibraryService::new(repo);

    let page = service.list(&params(&[("q", "DUNE")]), None).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.books[0].title, "Dune");

    // Matches author as well as title.
    let page = service.list(&params(&[("q", "le guin"), ("page_size", "50")]), None).await.unwrap();
    assert_eq!(page.pagination.total, 3);

    let page = service
        .list(&params(&[("status", "Finished"), ("page_size", "50")]), None)
        .await
        .unwrap();
    assert_eq!(page.pagination.total, 17);
    assert!(page.books.iter().all(|b| b.status == Status::Finished));

    // Wildcards are literal.
    let page = service.list(&params(&[("q", "%")]), None).await.unwrap();
    assert_eq!(page.pagination.total, 0);
}
