//! Integration tests for editing sessions over the in-memory backend

use std::sync::Arc;

use async_trait::async_trait;
use vitrine_model::{SectionContent, SectionId, SectionKind, ThemeColor};
use vitrine_renderer::HtmlOptions;
use vitrine_store::{MemoryStore, NewPage, ObjectStore, PageStore, SectionRow, StoreError};
use vitrine_workspace::{resolve_public, ContentEdit, EditorSession, Mutation, SessionError};

#[tokio::test]
async fn first_save_inserts_then_second_save_updates() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());

    session.set_title("Meu E-book de Receitas");
    session.apply(Mutation::AddSection {
        kind: SectionKind::Hero,
    })?;
    session.apply(Mutation::AddSection {
        kind: SectionKind::Price,
    })?;

    let page_id = session.save().await?;
    assert!(!session.draft().is_dirty());
    assert!(session
        .draft()
        .sections()
        .iter()
        .all(|section| !section.id.is_unsaved()));
    let ids_after_first: Vec<String> = session
        .draft()
        .sections()
        .iter()
        .map(|section| section.id.to_string())
        .collect();

    // Editing and saving again updates the same rows instead of
    // inserting new ones.
    let hero_id = session.draft().sections()[0].id.clone();
    session.edit_section(&hero_id, ContentEdit::SetTitle("Novo título".to_string()))?;
    session.save().await?;

    let ids_after_second: Vec<String> = session
        .draft()
        .sections()
        .iter()
        .map(|section| section.id.to_string())
        .collect();
    assert_eq!(ids_after_first, ids_after_second);

    let record = store.load_page(&page_id).await?;
    assert_eq!(record.sections.len(), 2);
    match &record.sections[0].content {
        SectionContent::Hero(hero) => assert_eq!(hero.title, "Novo título"),
        other => panic!("expected hero first, got {}", other.kind_str()),
    }
    Ok(())
}

#[tokio::test]
async fn draft_pages_are_invisible_until_published() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());

    session.set_title("Guia Completo");
    session.apply(Mutation::AddSection {
        kind: SectionKind::Hero,
    })?;
    session.save().await?;

    // The slug exists, but the page is still a draft.
    assert!(resolve_public(store.as_ref(), "guia-completo")
        .await?
        .is_none());

    session.set_published(true);
    session.save().await?;

    let page = resolve_public(store.as_ref(), "guia-completo")
        .await?
        .expect("published page should resolve");
    let html = page.render_html(HtmlOptions::default());
    assert!(html.contains("<h1"));
    assert!(html.contains("Título Principal"));
    assert!(!html.contains("Modo Preview"));
    Ok(())
}

#[tokio::test]
async fn saving_without_required_fields_fails() {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());
    session.set_title("   ");

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, SessionError::MissingRequiredFields));
    assert_eq!(err.to_string(), "Título e slug são obrigatórios.");

    // Nothing was written.
    assert!(store.list_pages().await.unwrap().is_empty());
    assert!(session.draft().is_dirty());
}

#[tokio::test]
async fn duplicate_slugs_fail_the_save() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());

    let mut first = EditorSession::new_page(store.clone(), store.clone());
    first.set_title("Oferta Especial");
    first.save().await?;

    let mut second = EditorSession::new_page(store.clone(), store.clone());
    second.set_title("Oferta Especial");
    let err = second.save().await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Store(StoreError::SlugTaken(slug)) if slug == "oferta-especial"
    ));
    Ok(())
}

#[tokio::test]
async fn hero_background_upload_stages_the_url() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());
    session.apply(Mutation::AddSection {
        kind: SectionKind::Hero,
    })?;
    let hero_id = session.draft().sections()[0].id.clone();

    let url = session
        .upload_hero_background(&hero_id, "capa.png", vec![7, 7, 7], "image/png")
        .await?;
    assert!(url.starts_with("memory://page-images/"));
    assert!(url.ends_with(".png"));

    match &session.draft().section(&hero_id).unwrap().content {
        SectionContent::Hero(hero) => assert_eq!(hero.background_image.as_deref(), Some(url.as_str())),
        other => panic!("expected hero, got {}", other.kind_str()),
    }
    Ok(())
}

struct BrokenObjectStore;

#[async_trait]
impl ObjectStore for BrokenObjectStore {
    async fn upload(
        &self,
        _filename: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        Err(StoreError::Api {
            status: 500,
            message: "bucket offline".to_string(),
        })
    }
}

#[tokio::test]
async fn upload_failures_leave_the_draft_untouched() {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store, Arc::new(BrokenObjectStore));
    session
        .apply(Mutation::AddSection {
            kind: SectionKind::Hero,
        })
        .unwrap();
    let hero_id = session.draft().sections()[0].id.clone();
    let version_before = session.draft().version();

    let result = session
        .upload_hero_background(&hero_id, "capa.png", vec![1], "image/png")
        .await;

    assert!(matches!(result, Err(SessionError::Store(_))));
    assert_eq!(session.draft().version(), version_before);
    match &session.draft().section(&hero_id).unwrap().content {
        SectionContent::Hero(hero) => assert!(hero.background_image.is_none()),
        other => panic!("expected hero, got {}", other.kind_str()),
    }
}

#[tokio::test]
async fn uploads_require_a_hero_section() {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());
    session
        .apply(Mutation::AddSection {
            kind: SectionKind::Text,
        })
        .unwrap();
    let text_id = session.draft().sections()[0].id.clone();

    let result = session
        .upload_hero_background(&text_id, "capa.png", vec![1], "image/png")
        .await;
    assert!(matches!(result, Err(SessionError::NotAHeroSection(_))));
}

#[tokio::test]
async fn removing_a_section_deletes_its_row_on_save() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());
    session.set_title("Página");
    session.apply(Mutation::AddSection {
        kind: SectionKind::Hero,
    })?;
    session.apply(Mutation::AddSection {
        kind: SectionKind::Faq,
    })?;
    let page_id = session.save().await?;

    let faq_id = session.draft().sections()[1].id.clone();
    session.apply(Mutation::RemoveSection { id: faq_id })?;
    session.save().await?;

    let record = store.load_page(&page_id).await?;
    assert_eq!(record.sections.len(), 1);
    assert_eq!(record.sections[0].kind_str(), "hero");
    Ok(())
}

#[tokio::test]
async fn moving_sections_persists_the_new_order() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());
    session.set_title("Página");
    session.apply(Mutation::AddSection {
        kind: SectionKind::Hero,
    })?;
    session.apply(Mutation::AddSection {
        kind: SectionKind::Text,
    })?;
    let page_id = session.save().await?;

    let text_id = session.draft().sections()[1].id.clone();
    session.apply(Mutation::MoveSection {
        id: text_id,
        to_index: 0,
    })?;
    session.save().await?;

    let reopened = EditorSession::open(store.clone(), store.clone(), &page_id).await?;
    let kinds: Vec<&str> = reopened
        .draft()
        .sections()
        .iter()
        .map(|section| section.kind_str())
        .collect();
    assert_eq!(kinds, vec!["text", "hero"]);
    Ok(())
}

#[tokio::test]
async fn unknown_sections_round_trip_through_save() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());

    // Seed a row whose kind this build does not know.
    let meta = store
        .create_page(NewPage {
            title: "Página".to_string(),
            slug: "pagina".to_string(),
            published: false,
            theme_color: ThemeColor::default(),
        })
        .await?;
    let page_id = meta.id.expect("created page carries an id");
    let blob = serde_json::json!({ "videoUrl": "https://cdn.example.com/v.mp4", "autoplay": true });
    let row_id = store
        .insert_section(
            &page_id,
            SectionRow {
                content: SectionContent::decode("video", blob.clone()),
                order: 0,
            },
        )
        .await?;

    // A full edit-and-save pass elsewhere on the page leaves it intact.
    let mut session = EditorSession::open(store.clone(), store.clone(), &page_id).await?;
    session.apply(Mutation::AddSection {
        kind: SectionKind::Text,
    })?;
    session.save().await?;

    let record = store.load_page(&page_id).await?;
    let video = record
        .sections
        .iter()
        .find(|section| section.id.to_string() == row_id)
        .expect("video row survives the save");
    assert_eq!(video.content.kind_str(), "video");
    assert_eq!(video.content.encode(), blob);
    Ok(())
}

#[tokio::test]
async fn preview_and_editor_panels_come_from_staged_state() -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let mut session = EditorSession::new_page(store.clone(), store.clone());
    session.apply(Mutation::AddSection {
        kind: SectionKind::Hero,
    })?;
    let hero_id = session.draft().sections()[0].id.clone();
    session.edit_section(&hero_id, ContentEdit::SetTitle("Ainda não salvo".to_string()))?;

    // Staged content shows up without any save.
    let preview = session.preview();
    let text = preview.text_content();
    assert!(text.contains("Modo Preview - Esta é uma visualização da sua página de vendas"));
    assert!(text.contains("Ainda não salvo"));

    let panel = session
        .editor_panel(&hero_id)
        .expect("staged section has a panel");
    assert!(panel
        .find_all("input")
        .iter()
        .any(|input| input.attr("value") == Some("Ainda não salvo")));

    let ghost = SectionId::Persisted("ghost".to_string());
    assert!(session.editor_panel(&ghost).is_none());

    // The stacked panel view covers every staged section in display order.
    session.apply(Mutation::AddSection {
        kind: SectionKind::Faq,
    })?;
    session.apply(Mutation::MoveSection {
        id: hero_id.clone(),
        to_index: 1,
    })?;
    let panels = session.editor_panels();
    let headers: Vec<String> = panels
        .find_all("h4")
        .iter()
        .map(|h| h.text_content())
        .collect();
    assert_eq!(headers, vec!["Perguntas Frequentes", "Seção Hero"]);
    Ok(())
}
