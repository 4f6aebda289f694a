use crate::app::session::FETCH_FAILURE_MESSAGE;
use crate::app::{AppContext, Result, StoriesError};
use crate::domain::Story;
use crate::search;

pub async fn search(ctx: &AppContext, query: Option<String>) -> Result<()> {
    let mut session = ctx.session();
    if let Some(query) = query {
        session.set_term(query);
    }

    let term = session.term().to_string();
    if term.is_empty() {
        println!("No search term");
        return Ok(());
    }

    let request = session.begin(term);
    let completion = search::execute(ctx.client.as_ref(), request).await;
    session.complete(completion);

    if session.state().is_error {
        return Err(StoriesError::Other(FETCH_FAILURE_MESSAGE.to_string()));
    }

    let stories = session.visible_stories();
    if stories.is_empty() {
        println!("No stories");
        return Ok(());
    }

    for story in stories {
        println!("{}", format_story(story));
    }

    Ok(())
}

pub fn show_term(ctx: &AppContext) -> Result<()> {
    let session = ctx.session();
    println!("{}", session.term());
    Ok(())
}

fn format_story(story: &Story) -> String {
    let mut line = format!(
        "{:>5} pts {:>4} comments  {}",
        story.points,
        story.num_comments,
        story.display_title()
    );
    if !story.author.is_empty() {
        line.push_str(&format!(" ({})", story.author));
    }
    if let Some(url) = &story.url {
        line.push_str(&format!("\n      {}", url));
    }
    line
}
