//! First-contribution welcome comments.

use crate::provider_contract::PullRequestProvider;
use crate::service_error::ServiceError;
use crate::service_event::WelcomeCommentEvent;
use crate::service_outcome::ServiceOutcome;

/// Assembles the comment body: intro, configured markdown, then the admin
/// footer when the author administers the integration.
pub fn render_welcome_comment(
    author_username: &str,
    repository_slug: &str,
    markdown: &str,
    admin_edit_url: Option<&str>,
) -> String {
    let mut body = format!(
        "Hey, @{author_username}-- Since this is the first PR we've seen from you, here's some things you should know about contributing to {repository_slug}:\n"
    );
    body.push_str(markdown);
    if let Some(edit_url) = admin_edit_url {
        body.push_str(&format!(
            "* * *\nQuick note: By default, Code Climate will post the above comment on the *first* PR it sees from each contributor. If you'd like to customize this message or disable this, go [here]({edit_url}).\n"
        ));
    }
    body
}

pub fn post_welcome_comment<P>(
    provider: &P,
    event: &WelcomeCommentEvent,
) -> Result<ServiceOutcome, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    let descriptor = provider.descriptor();
    let settings = provider.settings();
    let comments = match provider.comments() {
        Some(comments) if settings.welcome_comment_enabled => comments,
        _ => {
            tracing::debug!(
                provider = descriptor.name,
                enabled = settings.welcome_comment_enabled,
                "welcome comment skipped"
            );
            return Ok(ServiceOutcome::nothing_happened());
        }
    };

    let repository = event.repository();
    let slug = repository.github_slug()?;
    let number = event.number()?;
    let author = event.author_username()?;
    let admin_edit_url = if event.author_is_site_admin()? {
        Some(event.edit_url()?)
    } else {
        None
    };

    let endpoint_url = comments.comment_url(&repository, number)?;
    let rendered = render_welcome_comment(
        author,
        slug,
        &settings.welcome_comment_markdown,
        admin_edit_url,
    );
    let body = comments.comment_body(&rendered);
    tracing::debug!(
        provider = descriptor.name,
        endpoint_url = endpoint_url.as_str(),
        number = number,
        "posting welcome comment"
    );
    let result = provider.client().post_json(&endpoint_url, &body);
    Ok(ServiceOutcome::from_delivery(result, body))
}
