//! HTML for one [`Page`]. All user-supplied text is escaped.

use std::fmt::Write;

use seat_store::EventRecord;

use crate::app::{LogView, Page, SearchResult};
use crate::request::Action;

const STYLE: &str = "body{background:#ffffff;color:#000000;font-family:sans-serif;padding:20px;}\
.seat{width:70px;height:50px;border:1px solid #7b7b7b;margin:4px;border-radius:6px;\
display:flex;flex-direction:column;justify-content:center;align-items:center;font-size:16px;}\
.occupied{background:#06b6d430;border-color:#06b6d4;}\
.row{display:flex;}\
.reset{color:red;border:1px solid red;padding:10px;margin-bottom:10px;}\
.message{padding:10px;background:#909090;border-left:4px solid #06b6d4;}\
.found{padding:10px;background:#909090;border-left:4px solid #0f0;}\
.missing{padding:10px;background:#ffdede;border-left:4px solid #f00;}";

#[must_use]
pub fn render_page(page: &Page) -> String {
    let mut out = String::new();
    out.push_str("<html><head><title>Seat Manager</title><style>");
    out.push_str(STYLE);
    out.push_str("</style></head><body>");

    for reason in &page.resets {
        let _ = write!(
            out,
            "<div class='reset'>System Reset: {}</div>",
            escape_html(reason)
        );
    }

    out.push_str("<h1>Seat Allocation System</h1>");
    render_menu(&mut out);
    render_message(&mut out, &page.message);
    render_form(&mut out, page);
    if let Some(search) = &page.search {
        render_search(&mut out, search);
    }
    if page.action == Some(Action::Hall) {
        render_hall(&mut out, page);
    }
    if let Some(log) = &page.log {
        render_log(&mut out, log);
    }

    out.push_str("</body></html>");
    out
}

fn render_menu(out: &mut String) {
    out.push_str(
        "<form method='GET'>\
<select name='action' style='padding:12px; font-size:18px; width:200px'>\
<option value='' selected disabled>Choose an action</option>\
<option value='allocate'>Allocate Seat</option>\
<option value='deallocate'>Deallocate Seat</option>\
<option value='search'>Search Student</option>\
<option value='hall'>Display Hall</option>\
<option value='log'>View Log</option>\
</select>\
<button type='submit' style='padding:12px; font-size:18px; width:50px'>Go</button>\
</form><br>",
    );
}

fn render_message(out: &mut String, message: &str) {
    if message.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "<div class='message'>{}</div><br>",
        escape_html(message)
    );
}

fn render_form(out: &mut String, page: &Page) {
    match page.action {
        Some(Action::Allocate) => {
            out.push_str("<form method='GET'><input type='hidden' name='action' value='allocate'>");
            let _ = write!(
                out,
                "Rows: <input name='rows' type='number' value='{}' required style='width:60px'> \
Cols: <input name='cols' type='number' value='{}' required style='width:60px'> ",
                page.hall.rows, page.hall.cols
            );
            out.push_str(
                "<br><br>Roll: <input name='roll' type='number' required> \
Name: <input name='name' type='text' maxlength='49' required> \
<button type='submit'>Submit</button></form><br>\
<small>Note: You can edit Rows/Cols to resize the hall.</small><br><br>",
            );
        }
        Some(action @ (Action::Deallocate | Action::Search)) => {
            let _ = write!(
                out,
                "<form method='GET'><input type='hidden' name='action' value='{}'>\
Roll: <input name='roll' type='number' required> \
<button type='submit'>Submit</button></form><br>",
                action.as_str()
            );
        }
        _ => {}
    }
}

fn render_search(out: &mut String, search: &SearchResult) {
    match search {
        SearchResult::Found(student) => {
            let _ = write!(
                out,
                "<div class='found'>Found: {} (Roll {}) at Row {}, Col {}</div><br>",
                escape_html(&student.name),
                student.roll,
                student.row,
                student.col
            );
        }
        SearchResult::NotFound => {
            out.push_str("<div class='missing'>Student not found</div><br>");
        }
    }
}

fn render_hall(out: &mut String, page: &Page) {
    let hall = &page.hall;
    if hall.rows == 0 || hall.cols == 0 {
        out.push_str("<div>Hall not initialized. Allocate a student to start.</div>");
        return;
    }

    let _ = write!(out, "<h3>Hall ({} x {})</h3>", hall.rows, hall.cols);
    for row in 0..hall.rows as i32 {
        out.push_str("<div class='row'>");
        for col in 0..hall.cols as i32 {
            match hall.occupant(row, col) {
                Some(student) => {
                    let _ = write!(
                        out,
                        "<div class='seat occupied'>{}<br>{}</div>",
                        escape_html(&student.name),
                        student.roll
                    );
                }
                None => out.push_str("<div class='seat'></div>"),
            }
        }
        out.push_str("</div>");
    }
}

fn render_log(out: &mut String, log: &LogView) {
    out.push_str("<h3>Log</h3><pre>");
    match log {
        LogView::Empty => out.push_str("Log empty!\n"),
        LogView::Records(records) => {
            for record in records {
                out.push_str(&escape_html(&log_line(record)));
                out.push('\n');
            }
        }
        LogView::Unreadable(error) => {
            let _ = writeln!(out, "Log unreadable: {}", escape_html(error));
        }
    }
    out.push_str("</pre>");
}

#[must_use]
pub fn log_line(record: &EventRecord) -> String {
    let action = match record.action {
        seat_store::EventAction::Allocated => "ALLOCATED",
        seat_store::EventAction::Deallocated => "DEALLOCATED",
    };
    format!(
        "{} - {}: Roll={} at ({},{})",
        record.ts, action, record.roll, record.row, record.col
    )
}

#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
