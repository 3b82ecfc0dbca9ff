//! HTML templates for web interface
//!
//! Simple inline HTML templates without a template engine.

use jotter::{Note, User};

use crate::session::Flash;

/// Common CSS styles for all pages
const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 800px;
        margin: 40px auto;
        padding: 0 20px;
        background: #f5f5f5;
    }
    nav {
        margin-bottom: 20px;
    }
    nav a {
        margin-right: 15px;
        color: #0066cc;
        text-decoration: none;
        font-weight: bold;
    }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 {
        color: #333;
        border-bottom: 2px solid #0066cc;
        padding-bottom: 10px;
    }
    .form-group {
        margin: 15px 0;
    }
    label {
        display: block;
        font-weight: bold;
        margin-bottom: 5px;
        color: #333;
    }
    input[type="text"],
    input[type="email"],
    input[type="password"],
    textarea {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    textarea {
        resize: vertical;
    }
    button {
        background: #0066cc;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
    }
    button:hover {
        background: #0052a3;
    }
    .delete-btn {
        background: #d9534f;
        float: right;
    }
    .delete-btn:hover {
        background: #c9302c;
    }
    ul.notes {
        list-style: none;
        padding: 0;
    }
    ul.notes li {
        margin: 10px 0;
        padding: 12px;
        background: #f9f9f9;
        border-radius: 4px;
    }
    .note-date {
        color: #999;
        font-size: 12px;
    }
    .error {
        color: #a94442;
        background: #f2dede;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .success {
        color: #3c763d;
        background: #dff0d8;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
    .welcome {
        color: #31708f;
        background: #d9edf7;
        padding: 10px;
        border-radius: 4px;
        margin: 10px 0;
    }
"#;

/// Deletes a note, then reloads the home page. The server answers `{}`
/// whether or not anything was deleted.
const DELETE_SCRIPT: &str = r#"
    function deleteNote(noteId) {
        fetch("/delete-note", {
            method: "POST",
            body: JSON.stringify({ noteId: noteId }),
        }).then(() => {
            window.location.href = "/";
        });
    }
"#;

/// Wrap page content in the shared layout
fn layout(title: &str, signed_in: bool, flashes: &[Flash], body: &str) -> String {
    let nav = if signed_in {
        r#"<a href="/">Home</a><a href="/logout">Logout</a>"#
    } else {
        r#"<a href="/login">Login</a><a href="/sign-up">Sign Up</a>"#
    };
    let flashes_html = render_flashes(flashes);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Jotter - {title}</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    <nav>{nav}</nav>
    <div class="container">
        {flashes_html}
        {body}
    </div>
    <script>{DELETE_SCRIPT}</script>
</body>
</html>"#
    )
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="{}">{}</div>"#,
                f.kind.as_str(),
                html_escape(&f.message)
            )
        })
        .collect()
}

/// Render the login page
pub fn login_page(flashes: &[Flash]) -> String {
    layout(
        "Login",
        false,
        flashes,
        r#"<h1>Login</h1>
        <form method="POST" action="/login">
            <div class="form-group">
                <label for="email">Email:</label>
                <input type="email" id="email" name="email" required autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password" required>
            </div>
            <button type="submit">Login</button>
        </form>
        <p style="margin-top: 20px; text-align: center;">
            Don't have an account? <a href="/sign-up">Sign up here</a>
        </p>"#,
    )
}

/// Render the sign-up page
pub fn signup_page(flashes: &[Flash]) -> String {
    layout(
        "Sign Up",
        false,
        flashes,
        r#"<h1>Sign Up</h1>
        <form method="POST" action="/sign-up">
            <div class="form-group">
                <label for="email">Email:</label>
                <input type="email" id="email" name="email" required autofocus>
            </div>
            <div class="form-group">
                <label for="name">Name:</label>
                <input type="text" id="name" name="name" required
                       pattern="[a-zA-Z0-9_-]+"
                       title="Letters, numbers, underscores, and hyphens only">
                <small style="color: #666;">3 to 30 letters, numbers, underscores, or hyphens</small>
            </div>
            <div class="form-group">
                <label for="password">Password:</label>
                <input type="password" id="password" name="password" required>
                <small style="color: #666;">At least 8 characters, mixing upper and lower case letters and numbers</small>
            </div>
            <div class="form-group">
                <label for="confirm-password">Confirm Password:</label>
                <input type="password" id="confirm-password" name="confirm-password" required>
            </div>
            <button type="submit">Sign Up</button>
        </form>"#,
    )
}

/// Render the home page: the user's notes, each with an edit form
pub fn home_page(user: &User, notes: &[Note], flashes: &[Flash], new_user: bool) -> String {
    let welcome = if new_user {
        format!(
            r#"<div class="welcome">Welcome to Jotter, {}!</div>"#,
            html_escape(&user.name)
        )
    } else {
        String::new()
    };

    let notes_html = if notes.is_empty() {
        "<p><em>No notes yet.</em></p>".to_string()
    } else {
        let items: String = notes.iter().map(note_item).collect();
        format!(r#"<ul class="notes">{items}</ul>"#)
    };

    let body = format!(
        r#"<h1>Notes</h1>
        {welcome}
        {notes_html}
        <form method="POST" action="/">
            <div class="form-group">
                <label for="note">New note:</label>
                <textarea id="note" name="note" rows="3"></textarea>
            </div>
            <button type="submit">Add Note</button>
        </form>"#
    );

    layout("Home", true, flashes, &body)
}

fn note_item(note: &Note) -> String {
    let id = note.id;
    let data = html_escape(&note.data);
    let date = note.date.format("%Y-%m-%d %H:%M UTC");

    format!(
        r#"<li>
            <button type="button" class="delete-btn" onclick="deleteNote({id})">Delete</button>
            <div class="note-date">{date}</div>
            <div class="note-text">{data}</div>
            <form method="POST" action="/edit-note">
                <input type="hidden" name="noteId" value="{id}">
                <textarea name="note" rows="2">{data}</textarea>
                <button type="submit">Save</button>
            </form>
        </li>"#
    )
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
