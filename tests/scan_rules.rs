use gifkeep::{
    message::{Attachment, Embed, EmbedKind, EmbedMedia, Message},
    types::MediaFormat,
};

fn attachment(url: &str, content_type: Option<&str>) -> Attachment {
    Attachment {
        url: url.to_string(),
        content_type: content_type.map(str::to_string),
        width: 64,
        height: 48,
    }
}

fn embed(kind: EmbedKind, url: Option<&str>) -> Embed {
    Embed {
        kind,
        url: url.map(str::to_string),
        thumbnail: None,
        image: None,
    }
}

fn message(attachments: Vec<Attachment>, embeds: Vec<Embed>) -> Message {
    Message {
        id: 1,
        channel_id: 1,
        author_id: 42,
        attachments,
        embeds,
    }
}

#[test]
fn gif_attachment_qualifies() {
    let msg = message(
        vec![attachment("https://cdn.example/a.gif", Some("image/gif"))],
        vec![],
    );
    let candidates = msg.media_candidates(true, true);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].format, MediaFormat::DirectFile);
    assert_eq!(candidates[0].key, "https://cdn.example/a.gif");
    assert_eq!(candidates[0].key, candidates[0].src);
}

#[test]
fn mime_check_is_case_insensitive_and_ignores_parameters() {
    let upper = message(
        vec![attachment("https://cdn.example/a.gif", Some("IMAGE/GIF"))],
        vec![],
    );
    assert_eq!(upper.media_candidates(true, true).len(), 1);

    let with_params = message(
        vec![attachment(
            "https://cdn.example/a.gif",
            Some("image/gif; v=1"),
        )],
        vec![],
    );
    assert_eq!(with_params.media_candidates(true, true).len(), 1);
}

#[test]
fn wrong_mime_disqualifies_even_with_gif_path() {
    let msg = message(
        vec![attachment("https://cdn.example/a.gif", Some("image/png"))],
        vec![],
    );
    assert!(msg.media_candidates(true, true).is_empty());
}

#[test]
fn wrong_path_disqualifies_even_with_gif_mime() {
    let msg = message(
        vec![attachment("https://cdn.example/a.png", Some("image/gif"))],
        vec![],
    );
    assert!(msg.media_candidates(true, true).is_empty());
}

#[test]
fn missing_mime_disqualifies() {
    let msg = message(vec![attachment("https://cdn.example/a.gif", None)], vec![]);
    assert!(msg.media_candidates(true, true).is_empty());
}

#[test]
fn query_string_does_not_defeat_the_path_check() {
    let msg = message(
        vec![attachment(
            "https://cdn.example/a.gif?size=48&quality=lossless",
            Some("image/gif"),
        )],
        vec![],
    );
    assert_eq!(msg.media_candidates(true, true).len(), 1);
}

#[test]
fn uppercase_extension_matches_case_insensitively() {
    let msg = message(
        vec![attachment("https://cdn.example/a.GIF", Some("image/gif"))],
        vec![],
    );
    assert_eq!(msg.media_candidates(true, true).len(), 1);
}

#[test]
fn unparseable_url_falls_back_to_raw_suffix() {
    let msg = message(
        vec![attachment("not a real url but ends in .GIF", Some("image/gif"))],
        vec![],
    );
    assert_eq!(msg.media_candidates(true, true).len(), 1);

    let miss = message(
        vec![attachment("not a url and not a gif", Some("image/gif"))],
        vec![],
    );
    assert!(miss.media_candidates(true, true).is_empty());
}

#[test]
fn gifv_embed_with_page_url_qualifies() {
    let msg = message(
        vec![],
        vec![embed(EmbedKind::Gifv, Some("https://tenor.example/view/x"))],
    );
    let candidates = msg.media_candidates(true, true);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].format, MediaFormat::LinkEmbed);
    assert_eq!(candidates[0].key, "https://tenor.example/view/x");
}

#[test]
fn gifv_embed_without_page_url_is_skipped() {
    let msg = message(vec![], vec![embed(EmbedKind::Gifv, None)]);
    assert!(msg.media_candidates(true, true).is_empty());
}

#[test]
fn non_gifv_embeds_are_skipped() {
    let msg = message(
        vec![],
        vec![
            embed(EmbedKind::Image, Some("https://site.example/a")),
            embed(EmbedKind::Video, Some("https://site.example/b")),
            embed(EmbedKind::Link, Some("https://site.example/c")),
        ],
    );
    assert!(msg.media_candidates(true, true).is_empty());
}

#[test]
fn embed_dimensions_prefer_thumbnail_then_image_then_zero() {
    let both = Embed {
        kind: EmbedKind::Gifv,
        url: Some("https://tenor.example/view/x".to_string()),
        thumbnail: Some(EmbedMedia {
            width: 200,
            height: 150,
        }),
        image: Some(EmbedMedia {
            width: 300,
            height: 200,
        }),
    };
    assert_eq!(both.preview_dimensions(), (200, 150));

    let image_only = Embed {
        thumbnail: None,
        ..both.clone()
    };
    assert_eq!(image_only.preview_dimensions(), (300, 200));

    let neither = Embed {
        thumbnail: None,
        image: None,
        ..both
    };
    assert_eq!(neither.preview_dimensions(), (0, 0));
}

#[test]
fn gates_suppress_each_list_independently() {
    let msg = message(
        vec![attachment("https://cdn.example/a.gif", Some("image/gif"))],
        vec![embed(EmbedKind::Gifv, Some("https://tenor.example/view/x"))],
    );

    assert_eq!(msg.media_candidates(true, true).len(), 2);
    assert_eq!(msg.media_candidates(false, true).len(), 1);
    assert_eq!(msg.media_candidates(true, false).len(), 1);
    assert!(msg.media_candidates(false, false).is_empty());
}
