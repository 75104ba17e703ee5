use super::{display_time, pagination_header};
use std::fmt::Write;
use trakt_api::endpoints::comments::Comment;
use trakt_api::Page;

const SHOWING_SPOILERS: &str = "**Note: Showing all spoilers**\n\n";
const HIDING_SPOILERS: &str =
    "**Note: Spoilers are hidden. Use `show_spoilers=True` to view them.**\n\n";
const SPOILER_WARNING: &str = "**⚠️ SPOILER WARNING ⚠️**\n\n*This comment contains spoilers. Use `show_spoilers=True` to view it.*\n\n";

fn spoiler_note(show_spoilers: bool) -> &'static str {
    if show_spoilers {
        SHOWING_SPOILERS
    } else {
        HIDING_SPOILERS
    }
}

fn tags(comment: &Comment) -> String {
    let mut tags = String::new();
    if comment.review {
        tags.push_str(" [REVIEW]");
    }
    if comment.spoiler {
        tags.push_str(" [SPOILER]");
    }
    tags
}

/// The comment text, or a warning in its place when it holds hidden spoilers.
fn push_body(out: &mut String, comment: &Comment, show_spoilers: bool) {
    if comment.has_spoilers() && !show_spoilers {
        out.push_str(SPOILER_WARNING);
        return;
    }

    let text = comment
        .comment
        .replace("[spoiler]", "")
        .replace("[/spoiler]", "");
    let _ = write!(out, "{}\n\n", text);
}

fn push_footer(out: &mut String, comment: &Comment) {
    let _ = write!(
        out,
        "*Likes: {} | Replies: {} | ID: {}*\n\n",
        comment.likes, comment.replies, comment.id
    );
}

fn push_entry(out: &mut String, comment: &Comment, show_spoilers: bool) {
    let _ = writeln!(
        out,
        "### {}{} - {}",
        comment.username(),
        tags(comment),
        display_time(&comment.created_at)
    );
    push_body(out, comment, show_spoilers);
    push_footer(out, comment);
    out.push_str("---\n\n");
}

fn comment_list(heading: &str, page: &Page<Comment>, show_spoilers: bool) -> String {
    let mut out = format!("# {}\n\n", heading);
    out.push_str(&pagination_header(&page.pagination, page.items.len()));
    out.push_str(spoiler_note(show_spoilers));

    if page.is_empty() {
        out.push_str("No comments found.");
        return out;
    }
    for comment in &page.items {
        push_entry(&mut out, comment, show_spoilers);
    }
    out
}

/// Comments on a movie or show; `title` names what was commented on.
pub fn format_comments(title: &str, page: &Page<Comment>, show_spoilers: bool) -> String {
    comment_list(&format!("Comments for {}", title), page, show_spoilers)
}

/// A single comment, with its replies when any were fetched.
pub fn format_comment(comment: &Comment, replies: &[Comment], show_spoilers: bool) -> String {
    let mut out = format!("# Comment by {}{}\n\n", comment.username(), tags(comment));
    out.push_str(spoiler_note(show_spoilers));
    let _ = write!(out, "**Posted:** {}\n\n", display_time(&comment.created_at));
    push_body(&mut out, comment, show_spoilers);
    push_footer(&mut out, comment);

    if !replies.is_empty() {
        out.push_str("## Replies\n\n");
        for reply in replies {
            push_entry(&mut out, reply, show_spoilers);
        }
    }
    out
}

pub fn format_comment_replies(comment_id: u64, page: &Page<Comment>, show_spoilers: bool) -> String {
    comment_list(&format!("Replies to comment {}", comment_id), page, show_spoilers)
}
