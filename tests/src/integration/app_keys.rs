//! # Keyboard Handling
//!
//! Drives the root `App` with key events the way the terminal loop does.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rag_api::RagBackend;
    use rag_dash::config::DashboardConfig;
    use rag_dash::domain::{App, AppState, DocumentKind, Focus};

    use crate::support::{settle, Call, CallKind, FakeBackend};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    async fn mounted(fake: &Arc<FakeBackend>) -> App {
        let backend: Arc<dyn RagBackend> = fake.clone();
        let app = App::mount(backend, &DashboardConfig::default());
        settle().await;
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount_loads_health_and_documents() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        assert_eq!(fake.count(CallKind::Health), 1);
        assert_eq!(fake.count(CallKind::CleanDocuments), 1);
        let view = app.view();
        assert_eq!(view.state, AppState::Dashboard);
        assert_eq!(view.focus, Focus::Search);
        assert!(view.health.snapshot.is_some());

        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_type_and_submit_search() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        type_text(&mut app, "rust");
        app.handle_key(press(KeyCode::Backspace));
        app.handle_key(press(KeyCode::Up));
        app.handle_key(press(KeyCode::Enter));
        settle().await;

        assert!(fake.calls().contains(&Call::Search {
            query: "rus".to_string(),
            k: 6
        }));
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_moves_input_to_rag() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.view().focus, Focus::Rag);
        type_text(&mut app, "why?");
        app.handle_key(press(KeyCode::Enter));
        settle().await;

        let view = app.view();
        assert_eq!(view.search.query, "");
        assert_eq!(view.rag.question, "why?");
        assert!(fake.calls().contains(&Call::Rag {
            query: "why?".to_string(),
            k: 3
        }));

        app.handle_key(press(KeyCode::BackTab));
        assert_eq!(app.view().focus, Focus::Search);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_document_kind_keys() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.view().focus, Focus::Documents);

        app.handle_key(press(KeyCode::Char('r')));
        settle().await;
        assert_eq!(app.view().documents.kind, DocumentKind::Raw);
        assert_eq!(fake.count(CallKind::RawDocuments), 1);

        app.handle_key(press(KeyCode::Right));
        settle().await;
        assert_eq!(app.view().documents.kind, DocumentKind::Clean);
        assert_eq!(fake.count(CallKind::CleanDocuments), 2);

        app.handle_key(press(KeyCode::Enter));
        settle().await;
        assert_eq!(fake.count(CallKind::CleanDocuments), 3);
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_swallows_next_key() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        app.handle_key(press(KeyCode::F(1)));
        assert_eq!(app.view().state, AppState::Help);
        app.handle_key(press(KeyCode::Char('x')));
        assert_eq!(app.view().state, AppState::Dashboard);
        assert_eq!(app.view().search.query, "");
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_function_keys_hit_backend() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        app.handle_key(press(KeyCode::F(5)));
        settle().await;
        assert_eq!(fake.count(CallKind::Health), 2);

        app.handle_key(press(KeyCode::F(9)));
        settle().await;
        assert_eq!(fake.count(CallKind::ReloadIndex), 1);
        assert!(app.view().health.notice.is_some());
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_keys() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit());
        app.shutdown();

        let mut app = mounted(&fake).await;
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
        assert_eq!(app.view().search.query, "");
        app.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_modified_chars_are_not_typed() {
        let fake = Arc::new(FakeBackend::new());
        let mut app = mounted(&fake).await;

        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::ALT));
        app.handle_key(KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT));

        assert_eq!(app.view().search.query, "B");
        assert!(!app.should_quit());
        app.shutdown();
    }
}
