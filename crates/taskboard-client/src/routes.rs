//! Endpoint paths of the board service.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

// RFC 3986 path segment: everything outside unreserved/sub-delims is escaped
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn seg(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

pub fn boards() -> String {
    "/boards".to_string()
}

pub fn board(board_id: &str) -> String {
    format!("/boards/{}", seg(board_id))
}

pub fn columns(board_id: &str) -> String {
    format!("/boards/{}/columns", seg(board_id))
}

pub fn column(board_id: &str, column_id: &str) -> String {
    format!("/boards/{}/columns/{}", seg(board_id), seg(column_id))
}

pub fn column_reorder(board_id: &str) -> String {
    format!("/boards/{}/columns/reorder", seg(board_id))
}

pub fn tasks(board_id: &str, column_id: &str) -> String {
    format!("/boards/{}/columns/{}/task", seg(board_id), seg(column_id))
}

pub fn task(board_id: &str, column_id: &str, task_id: &str) -> String {
    format!(
        "/boards/{}/columns/{}/task/{}",
        seg(board_id),
        seg(column_id),
        seg(task_id)
    )
}

pub fn task_reorder(board_id: &str, column_id: &str) -> String {
    format!(
        "/boards/{}/columns/{}/tasks/reorder",
        seg(board_id),
        seg(column_id)
    )
}
