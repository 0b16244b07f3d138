//! 片段翻译管道集成测试
//!
//! 覆盖批次划分、交叉引用保留、结构保持和度量换算

use compendium_translator::parsers::{fragment_to_dom, get_fragment_root, serialize_inner};
use compendium_translator::translation::{translate_fragment, TranslationConfig};

#[allow(dead_code)]
mod common {
    include!("common/mod.rs");
}

use common::{service, strip_text, RecordingBackend};

#[tokio::test]
async fn test_inline_wrapped_text_is_one_call() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>Hello <b>World</b></p>")
        .await
        .unwrap();

    assert_eq!(output, "<p>HELLO <b>WORLD</b></p>");
    assert_eq!(
        service.engine().backend().requests(),
        vec!["Hello &nbsp;World".to_string()]
    );
}

#[tokio::test]
async fn test_block_siblings_are_separate_calls() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>Hello</p><p>World</p>")
        .await
        .unwrap();

    assert_eq!(output, "<p>HELLO</p><p>WORLD</p>");
    assert_eq!(
        service.engine().backend().requests(),
        vec!["Hello".to_string(), "World".to_string()]
    );
}

#[tokio::test]
async fn test_line_break_forces_flush() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>Line one<br>Line two</p>")
        .await
        .unwrap();

    assert_eq!(output, "<p>LINE ONE<br>LINE TWO</p>");
    assert_eq!(service.engine().backend().calls(), 2);
}

#[tokio::test]
async fn test_nested_inline_tags_merge() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment(
            "<p>A <span>quick <i>brown</i></span> <a href=\"#fox\">fox</a> jumps</p>",
        )
        .await
        .unwrap();

    assert_eq!(
        output,
        "<p>A <span>QUICK <i>BROWN</i></span> <a href=\"#fox\">FOX</a> JUMPS</p>"
    );
    assert_eq!(service.engine().backend().calls(), 1);
}

#[tokio::test]
async fn test_structure_is_preserved() {
    let html = concat!(
        "<div class=\"card\"><h2 id=\"title\">Magic Items</h2>",
        "<p>Some <em>emphasis</em> and <a href=\"/items/ring\">a link</a>.</p>",
        "<ul><li>One</li><li>Two</li></ul></div>"
    );

    let service = service(RecordingBackend::uppercase());
    let output = service.translate_fragment(html).await.unwrap();

    assert_eq!(strip_text(&output), strip_text(html));
    assert!(output.contains("MAGIC ITEMS"));
    assert!(output.contains("href=\"/items/ring\""));
}

#[tokio::test]
async fn test_cross_ref_identifier_is_never_sent() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>Cast @Compendium[dnd5e.spells.abc123]{Fireball} now.</p>")
        .await
        .unwrap();

    assert_eq!(
        output,
        "<p>CAST @Compendium[dnd5e.spells.abc123]{FIREBALL} NOW.</p>"
    );

    let requests = service.engine().backend().requests();
    assert_eq!(requests, vec!["Cast &nbsp;Fireball&nbsp; now.".to_string()]);
    assert!(requests.iter().all(|r| !r.contains("dnd5e")));
}

#[tokio::test]
async fn test_cross_ref_inside_inline_element() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>See <b>@Compendium[srd.items.shield]{Shield}</b> now</p>")
        .await
        .unwrap();

    assert_eq!(
        output,
        "<p>SEE <b>@Compendium[srd.items.shield]{SHIELD}</b> NOW</p>"
    );
    assert_eq!(service.engine().backend().calls(), 1);
}

#[tokio::test]
async fn test_malformed_cross_ref_passes_through() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>Use @Compendium[srd.items.rope] wisely</p>")
        .await
        .unwrap();

    assert_eq!(output, "<p>USE @Compendium[srd.items.rope] WISELY</p>");
    let requests = service.engine().backend().requests();
    assert!(requests.iter().all(|r| !r.contains("srd.items.rope")));
}

#[tokio::test]
async fn test_empty_and_blank_fragments() {
    let service = service(RecordingBackend::uppercase());

    assert_eq!(service.translate_fragment("").await.unwrap(), "");
    assert_eq!(service.translate_fragment("   ").await.unwrap(), "   ");
    assert_eq!(
        service.translate_fragment("<p>  </p>").await.unwrap(),
        "<p>  </p>"
    );
    assert_eq!(service.engine().backend().calls(), 0);
}

#[tokio::test]
async fn test_non_alphabetic_batches_skip_backend() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>12</p><p>Hello</p>")
        .await
        .unwrap();

    assert_eq!(output, "<p>12</p><p>HELLO</p>");
    assert_eq!(service.engine().backend().calls(), 1);
}

#[tokio::test]
async fn test_trailing_whitespace_node_still_flushes() {
    let service = service(RecordingBackend::uppercase());
    let output = service
        .translate_fragment("<p>Hello</p>\n")
        .await
        .unwrap();

    assert_eq!(output, "<p>HELLO</p>\n");
    assert_eq!(service.engine().backend().calls(), 1);
}

#[tokio::test]
async fn test_measurements_converted_in_fragment() {
    let service = service(RecordingBackend::echo());
    let output = service
        .translate_fragment("<p>The wall is 10 feet tall and the chest weighs 50 lb.</p>")
        .await
        .unwrap();

    assert_eq!(
        output,
        "<p>The wall is 3 meters tall and the chest weighs 23 kilograms.</p>"
    );
}

#[tokio::test]
async fn test_non_breaking_spaces() {
    let service = service(RecordingBackend::echo());

    // 解码后的不换行空格不会与连接标记冲突
    let output = service.translate_fragment("<p>a&nbsp;b</p>").await.unwrap();
    assert_eq!(output, "<p>a&nbsp;b</p>");
    assert_eq!(
        service.engine().backend().requests(),
        vec!["a\u{a0}b".to_string()]
    );

    // 文本中的字面量 `&nbsp;` 被改写为数值引用
    let output = service
        .translate_fragment("<p>x &amp;nbsp; y</p>")
        .await
        .unwrap();
    assert_eq!(output, "<p>x &amp;#160; y</p>");
}

#[tokio::test]
async fn test_translate_dom_in_place() {
    let dom = fragment_to_dom("<h1>Title</h1><p>Body <u>text</u></p>");
    let root = get_fragment_root(&dom).unwrap();

    let service = service(RecordingBackend::uppercase());
    service.translate_dom(&root).await.unwrap();

    assert_eq!(
        serialize_inner(&root).unwrap(),
        "<h1>TITLE</h1><p>BODY <u>TEXT</u></p>"
    );
    assert_eq!(service.engine().backend().calls(), 2);
}

#[tokio::test]
async fn test_convenience_function() {
    let backend = RecordingBackend::uppercase();
    let output = translate_fragment(&backend, &TranslationConfig::default(), "<p>Hi</p>")
        .await
        .unwrap();

    assert_eq!(output, "<p>HI</p>");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_identity_backend_is_stable() {
    let service = service(RecordingBackend::echo());
    let fragment = concat!(
        r#"<div class="note"><p id="cast">Cast @Compendium[dnd5e.spells.abc123]{Fireball}"#,
        "&nbsp;now<br>then <b>rest</b>.</p></div>\n  "
    );

    let first = service.translate_fragment(fragment).await.unwrap();
    let second = service.translate_fragment(fragment).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fragment);
    assert_eq!(service.translate_fragment(&first).await.unwrap(), first);
}
