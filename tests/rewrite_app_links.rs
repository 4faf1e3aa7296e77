// tests/rewrite_app_links.rs
use tvlisting::intent::IntentUri;
use tvlisting::{rewrite_app_links, xmltv, HandlerIdentity, EXTRA_DISPLAY_NUMBER};

const FEED: &str = r#"<tv>
  <channel>
    <display-number>1-1</display-number>
    <display-name>Broken TV</display-name>
    <app-link intent-uri="intent:#Intent;action=VIEW"/>
  </channel>
  <channel>
    <display-number>1-2</display-number>
    <display-name>Rich TV</display-name>
    <app-link intent-uri="intent:#Intent;action=VIEW;component=com.other/.OldActivity;S.display-number=1-2;end"/>
  </channel>
  <channel>
    <display-number>1-3</display-number>
    <display-name>No Link TV</display-name>
  </channel>
</tv>"#;

fn handler() -> HandlerIdentity {
    HandlerIdentity::new("com.example.tv", "RichActivity")
}

#[test]
fn malformed_uri_is_skipped_and_the_rest_of_the_batch_is_rewritten() {
    let mut listing = xmltv::parse(FEED.as_bytes()).unwrap();
    let malformed_before = listing.channels[0]
        .app_link
        .as_ref()
        .unwrap()
        .intent_uri
        .clone();

    rewrite_app_links(&mut listing, &handler());

    // Channel A: malformed encoding (no `end`), left untouched.
    assert_eq!(
        listing.channels[0].app_link.as_ref().unwrap().intent_uri,
        malformed_before
    );

    // Channel B: rewritten to the handler, action and extras preserved.
    let uri = listing.channels[1]
        .app_link
        .as_ref()
        .unwrap()
        .intent_uri
        .clone()
        .unwrap();
    let intent = IntentUri::decode(&uri).unwrap();
    assert_eq!(intent.action.as_deref(), Some("VIEW"));
    let component = intent.component.unwrap();
    assert_eq!(component.package, "com.example.tv");
    assert_eq!(component.class, "com.example.tv.RichActivity");
    assert_eq!(intent.extras[0].key, EXTRA_DISPLAY_NUMBER);
    assert_eq!(intent.extras[0].value, "1-2");

    // Channel C: no app link at all.
    assert!(listing.channels[2].app_link.is_none());
}

#[test]
fn rewrite_is_idempotent_for_the_same_handler() {
    let mut listing = xmltv::parse(FEED.as_bytes()).unwrap();
    rewrite_app_links(&mut listing, &handler());
    let after_once = listing.clone();
    rewrite_app_links(&mut listing, &handler());
    assert_eq!(listing, after_once);
}

#[test]
fn rewriting_twice_with_different_handlers_keeps_the_last_one() {
    let mut listing = xmltv::parse(FEED.as_bytes()).unwrap();
    rewrite_app_links(&mut listing, &handler());
    rewrite_app_links(&mut listing, &HandlerIdentity::new("com.acme.tv", "PlayerActivity"));

    let uri = listing.channels[1]
        .app_link
        .as_ref()
        .unwrap()
        .intent_uri
        .clone()
        .unwrap();
    let component = IntentUri::decode(&uri).unwrap().component.unwrap();
    assert_eq!(component.package, "com.acme.tv");
    assert_eq!(component.class, "com.acme.tv.PlayerActivity");
}
