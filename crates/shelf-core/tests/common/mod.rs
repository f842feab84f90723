//! In-process fake of the remote book store, served over real HTTP

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use shelf_core::{Book, BookDraft, BookId, HttpBookStore};

#[derive(Default)]
pub struct FakeState {
    pub books: Vec<Book>,
    pub next_id: u64,
    pub list_calls: usize,
    /// When set, every request answers with this status
    pub fail_with: Option<u16>,
    /// When set, list requests sleep this long before answering
    pub list_delay: Option<Duration>,
    /// Content-Type of the most recent write request
    pub last_content_type: Option<String>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakeServer {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl FakeServer {
    pub async fn start(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id.value()).max().unwrap_or(0) + 1;
        let state = Arc::new(Mutex::new(FakeState {
            books,
            next_id,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/api/books", get(list_books).post(create_book))
            .route("/api/books/{id}", put(update_book).delete(delete_book))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn store(&self) -> HttpBookStore {
        HttpBookStore::new(&self.base_url(), Duration::from_secs(5)).unwrap()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn fail_with(&self, status: Option<u16>) {
        self.state.lock().unwrap().fail_with = status;
    }
}

fn check_failure(state: &FakeState) -> Result<(), (StatusCode, String)> {
    match state.fail_with {
        Some(status) => Err((
            StatusCode::from_u16(status).unwrap(),
            "injected failure".to_string(),
        )),
        None => Ok(()),
    }
}

fn content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn list_books(State(state): State<Shared>) -> Result<Json<Vec<Book>>, (StatusCode, String)> {
    let delay = {
        let mut s = state.lock().unwrap();
        s.list_calls += 1;
        check_failure(&s)?;
        s.list_delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    Ok(Json(state.lock().unwrap().books.clone()))
}

async fn create_book(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(draft): Json<BookDraft>,
) -> Result<(StatusCode, Json<Book>), (StatusCode, String)> {
    let mut s = state.lock().unwrap();
    check_failure(&s)?;
    s.last_content_type = content_type(&headers);
    let book = Book::from_draft(BookId(s.next_id), draft);
    s.next_id += 1;
    s.books.push(book.clone());
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    headers: HeaderMap,
    Json(book): Json<Book>,
) -> Result<Json<Book>, (StatusCode, String)> {
    let mut s = state.lock().unwrap();
    check_failure(&s)?;
    s.last_content_type = content_type(&headers);
    let slot = s
        .books
        .iter_mut()
        .find(|b| b.id == BookId(id))
        .ok_or((StatusCode::NOT_FOUND, format!("book {id} not found")))?;
    *slot = Book { id: BookId(id), ..book };
    Ok(Json(slot.clone()))
}

async fn delete_book(
    State(state): State<Shared>,
    Path(id): Path<u64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut s = state.lock().unwrap();
    check_failure(&s)?;
    let before = s.books.len();
    s.books.retain(|b| b.id != BookId(id));
    if s.books.len() == before {
        return Err((StatusCode::NOT_FOUND, format!("book {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[allow(dead_code)]
pub fn sample_books(n: u64) -> Vec<Book> {
    use shelf_core::BookStatus;

    let genres = ["Fiction", "Science Fiction", "Poetry"];
    (1..=n)
        .map(|i| {
            let status = if i % 2 == 0 {
                BookStatus::Issued
            } else {
                BookStatus::Available
            };
            Book::from_draft(
                BookId(i),
                BookDraft::new(
                    format!("Title {i}"),
                    format!("Author {}", i % 5),
                    genres[(i % 3) as usize],
                    1950 + i as u32,
                    status,
                ),
            )
        })
        .collect()
}
