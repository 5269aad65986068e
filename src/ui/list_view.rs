//! Generic list screen: fetch, search, paginate, and the create/edit/delete
//! modals, parameterized per entity by a `ListConfig` and a `ListOps` impl.

use crossterm::event::KeyCode;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::{user_message, ApiError};
use crate::ui::components::popup::{render_alert, render_confirmation};
use crate::ui::form::{self, FormAction, FormState};

/// How local state catches up after a successful mutation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Resync {
    /// Use the representation the server returned (or drop the deleted row).
    ApplyReturned,
    /// Fetch the whole list again to pick up server-computed fields.
    Refetch,
}

pub struct ListConfig<E> {
    pub title: &'static str,
    pub page_size: usize,
    /// Values the search term is matched against.
    pub search_fields: fn(&E) -> Vec<String>,
    pub resync: Resync,
    pub delete_prompt: fn(&E) -> String,
}

/// Entity-specific side of a list screen.
pub trait ListOps {
    type Entity: Clone;

    fn id(entity: &Self::Entity) -> i64;

    fn blank_form(&self) -> FormState;

    fn edit_form(&self, entity: &Self::Entity) -> FormState;

    async fn fetch_all(&mut self) -> Result<Vec<Self::Entity>, ApiError>;

    /// Submit the modal. `Ok(None)` means nothing came back to apply locally.
    async fn submit(&self, form: &FormState) -> Result<Option<Self::Entity>, ApiError>;

    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

/// View state of one list screen.
pub struct ListView<E> {
    config: ListConfig<E>,
    items: Vec<E>,
    search: String,
    searching: bool,
    page: usize,
    table_state: TableState,
    loading: bool,
    error: Option<String>,
    alert: Option<String>,
    modal: Option<FormState>,
    pending_delete: Option<(i64, String)>,
}

impl<E: Clone> ListView<E> {
    pub fn new(config: ListConfig<E>) -> Self {
        Self {
            config,
            items: Vec::new(),
            search: String::new(),
            searching: false,
            page: 1,
            table_state: TableState::default(),
            loading: false,
            error: None,
            alert: None,
            modal: None,
            pending_delete: None,
        }
    }

    pub fn config(&self) -> &ListConfig<E> {
        &self.config
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn modal(&self) -> Option<&FormState> {
        self.modal.as_ref()
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete.as_ref().map(|(id, _)| *id)
    }

    /// True while a modal, prompt or the search box owns the keyboard.
    pub fn captures_input(&self) -> bool {
        self.searching || self.modal.is_some() || self.pending_delete.is_some() || self.alert.is_some()
    }

    pub fn filtered(&self) -> Vec<&E> {
        if self.search.is_empty() {
            return self.items.iter().collect();
        }
        let needle = self.search.to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                (self.config.search_fields)(item)
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.config.page_size.max(1))
    }

    /// Rows of the current page: filtered[(page-1)*size .. page*size].
    pub fn page_items(&self) -> Vec<&E> {
        let size = self.config.page_size.max(1);
        self.filtered()
            .into_iter()
            .skip((self.page - 1) * size)
            .take(size)
            .collect()
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.page = 1;
        self.reset_selection();
    }

    pub fn push_search(&mut self, c: char) {
        let mut term = self.search.clone();
        term.push(c);
        self.set_search(&term);
    }

    pub fn pop_search(&mut self) {
        let mut term = self.search.clone();
        term.pop();
        self.set_search(&term);
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count().max(1));
        self.reset_selection();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.saturating_sub(1));
    }

    fn reset_selection(&mut self) {
        let selected = if self.page_items().is_empty() { None } else { Some(0) };
        self.table_state.select(selected);
    }

    pub fn next(&mut self) {
        let len = self.page_items().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.page_items().len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&E> {
        let index = self.table_state.selected()?;
        self.page_items().get(index).copied()
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// A failed fetch shows the message and empties the list; nothing stale stays on screen.
    pub fn finish_load(&mut self, result: Result<Vec<E>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                self.items.clear();
                self.error = Some(user_message(&e));
            }
        }
        self.go_to_page(self.page);
    }

    /// Replace the row with the same id, or append a new one.
    pub fn apply_saved(&mut self, saved: E, id_of: fn(&E) -> i64) {
        let id = id_of(&saved);
        match self.items.iter_mut().find(|item| id_of(item) == id) {
            Some(existing) => *existing = saved,
            None => self.items.push(saved),
        }
        self.go_to_page(self.page);
    }

    pub fn remove(&mut self, id: i64, id_of: fn(&E) -> i64) {
        self.items.retain(|item| id_of(item) != id);
        self.go_to_page(self.page);
    }

    pub fn fail_mutation(&mut self, error: &ApiError) {
        self.alert = Some(user_message(error));
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn open_modal(&mut self, form: FormState) {
        self.modal = Some(form);
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn request_delete(&mut self, id_of: fn(&E) -> i64) {
        if let Some(item) = self.selected() {
            let prompt = (self.config.delete_prompt)(item);
            self.pending_delete = Some((id_of(item), prompt));
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

/// What the key handler needs the async side to do.
#[derive(Debug, PartialEq)]
pub enum ListCommand {
    Reload,
    Submit,
    ConfirmDelete,
    /// Screen-specific shortcut.
    Extra(char),
}

/// A list screen: its view state plus the operations behind it.
pub struct ListController<O: ListOps> {
    pub ops: O,
    pub view: ListView<O::Entity>,
}

impl<O: ListOps> ListController<O> {
    pub fn new(ops: O, config: ListConfig<O::Entity>) -> Self {
        Self {
            ops,
            view: ListView::new(config),
        }
    }

    /// Fetch everything once; no retry.
    pub async fn load(&mut self) {
        self.view.begin_load();
        let result = self.ops.fetch_all().await;
        if let Err(e) = &result {
            tracing::warn!(screen = self.view.config.title, network = e.is_network(), error = %e, "list load failed");
        }
        self.view.finish_load(result);
    }

    pub fn open_create(&mut self) {
        let form = self.ops.blank_form();
        self.view.open_modal(form);
    }

    pub fn open_edit(&mut self) {
        if let Some(item) = self.view.selected() {
            let form = self.ops.edit_form(item);
            self.view.open_modal(form);
        }
    }

    /// Send the modal; on failure the alert is raised and the modal and list stay as they were.
    pub async fn submit(&mut self) {
        let Some(form) = self.view.modal.as_ref() else {
            return;
        };
        match self.ops.submit(form).await {
            Ok(saved) => {
                self.view.close_modal();
                match self.view.config.resync {
                    Resync::ApplyReturned => {
                        if let Some(saved) = saved {
                            self.view.apply_saved(saved, O::id);
                        }
                    }
                    Resync::Refetch => self.load().await,
                }
            }
            Err(e) => self.view.fail_mutation(&e),
        }
    }

    pub async fn confirm_delete(&mut self) {
        let Some((id, _)) = self.view.pending_delete.take() else {
            return;
        };
        match self.ops.delete(id).await {
            Ok(()) => match self.view.config.resync {
                Resync::ApplyReturned => self.view.remove(id, O::id),
                Resync::Refetch => self.load().await,
            },
            Err(e) => self.view.fail_mutation(&e),
        }
    }

    pub async fn run(&mut self, command: ListCommand) {
        match command {
            ListCommand::Reload => self.load().await,
            ListCommand::Submit => self.submit().await,
            ListCommand::ConfirmDelete => self.confirm_delete().await,
            ListCommand::Extra(_) => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ListCommand> {
        let view = &mut self.view;

        if view.alert.is_some() {
            view.dismiss_alert();
            return None;
        }

        if view.pending_delete.is_some() {
            match key {
                KeyCode::Char('y') | KeyCode::Char('o') => return Some(ListCommand::ConfirmDelete),
                KeyCode::Char('n') | KeyCode::Esc => view.cancel_delete(),
                _ => {}
            }
            return None;
        }

        if let Some(form) = view.modal.as_mut() {
            return match form::handle_key(form, key) {
                Some(FormAction::Cancel) => {
                    view.close_modal();
                    None
                }
                Some(FormAction::Submit) => Some(ListCommand::Submit),
                None => None,
            };
        }

        if view.searching {
            match key {
                KeyCode::Char(c) => view.push_search(c),
                KeyCode::Backspace => view.pop_search(),
                KeyCode::Enter | KeyCode::Esc => view.searching = false,
                _ => {}
            }
            return None;
        }

        match key {
            KeyCode::Char('/') => view.searching = true,
            KeyCode::Down => view.next(),
            KeyCode::Up => view.previous(),
            KeyCode::Right | KeyCode::PageDown => view.next_page(),
            KeyCode::Left | KeyCode::PageUp => view.previous_page(),
            KeyCode::Char('n') => self.open_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.open_edit(),
            KeyCode::Char('d') => view.request_delete(O::id),
            KeyCode::Char('r') => return Some(ListCommand::Reload),
            KeyCode::Char(c) => return Some(ListCommand::Extra(c)),
            _ => {}
        }
        None
    }
}

/// Column headings and widths plus the cell builder for one entity.
pub struct TableLayout<E> {
    pub headers: &'static [&'static str],
    pub widths: &'static [Constraint],
    pub row: fn(&E) -> Vec<Cell<'static>>,
    pub hints: &'static str,
}

pub fn render_list<B: Backend, E: Clone>(frame: &mut Frame<B>, area: Rect, view: &mut ListView<E>, layout: &TableLayout<E>) {
    let banner_height = if view.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_search(frame, chunks[0], view);

    if let Some(error) = &view.error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[1]);
    }

    if view.loading {
        let loading = Paragraph::new("Chargement...")
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title(view.config.title).borders(Borders::ALL));
        frame.render_widget(loading, chunks[2]);
    } else {
        render_table(frame, chunks[2], view, layout);
    }

    let footer = Paragraph::new(format!(
        "Page {}/{} | {} | ←/→ Pages | / Rechercher | R Recharger",
        view.page,
        view.page_count().max(1),
        layout.hints
    ))
    .block(Block::default().borders(Borders::TOP))
    .style(Style::default().fg(Color::White));
    frame.render_widget(footer, chunks[3]);

    if let Some(form) = &view.modal {
        form::render_form(frame, form);
    }
    if let Some((_, prompt)) = &view.pending_delete {
        render_confirmation(frame, prompt);
    }
    if let Some(alert) = &view.alert {
        render_alert(frame, alert);
    }
}

fn render_search<B: Backend, E: Clone>(frame: &mut Frame<B>, area: Rect, view: &ListView<E>) {
    let style = if view.searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut text = view.search.clone();
    if view.searching {
        text.push('|');
    }
    let search = Paragraph::new(Spans::from(vec![
        Span::styled("Rechercher: ", style),
        Span::raw(text),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(search, area);
}

fn render_table<B: Backend, E: Clone>(frame: &mut Frame<B>, area: Rect, view: &mut ListView<E>, layout: &TableLayout<E>) {
    let header_cells = layout
        .headers
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let page = view.page_items();
    let rows: Vec<Row> = if page.is_empty() {
        vec![Row::new(vec![Cell::from("Aucun élément trouvé.")])]
    } else {
        page.into_iter().map(|item| Row::new((layout.row)(item)).height(1)).collect()
    };

    let title = format!("{} ({})", view.config.title, view.filtered().len());
    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .widths(layout.widths);

    frame.render_stateful_widget(table, area, &mut view.table_state);
}

#[cfg(test)]
mod tests {
    use std::cell::Cell as Counter;

    use super::*;
    use crate::models::Client;
    use crate::ui::form::{FormField, FormMode};

    fn client(id: i64, name: &str, email: &str) -> Client {
        Client {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: String::new(),
        }
    }

    fn numbered(count: i64) -> Vec<Client> {
        (1..=count)
            .map(|i| client(i, &format!("Client {i:02}"), &format!("c{i}@example.com")))
            .collect()
    }

    fn config(resync: Resync) -> ListConfig<Client> {
        ListConfig {
            title: "Clients",
            page_size: 5,
            search_fields: |c| vec![c.name.clone(), c.email.clone()],
            resync,
            delete_prompt: |c| format!("Supprimer {} ?", c.name),
        }
    }

    /// In-memory backend with a switch to make every mutation fail.
    struct FakeOps {
        rows: Vec<Client>,
        fail: bool,
        fetches: Counter<usize>,
    }

    impl FakeOps {
        fn new(rows: Vec<Client>) -> Self {
            Self {
                rows,
                fail: false,
                fetches: Counter::new(0),
            }
        }

        fn check(&self) -> Result<(), ApiError> {
            if self.fail {
                Err(ApiError::Http { status: 500, message: None })
            } else {
                Ok(())
            }
        }
    }

    impl ListOps for FakeOps {
        type Entity = Client;

        fn id(entity: &Client) -> i64 {
            entity.id
        }

        fn blank_form(&self) -> FormState {
            FormState::new("Nouveau client", FormMode::Create, vec![FormField::text("Nom", "").required()])
        }

        fn edit_form(&self, entity: &Client) -> FormState {
            FormState::new("Modifier", FormMode::Edit(entity.id), vec![FormField::text("Nom", &entity.name)])
        }

        async fn fetch_all(&mut self) -> Result<Vec<Client>, ApiError> {
            self.fetches.set(self.fetches.get() + 1);
            Ok(self.rows.clone())
        }

        async fn submit(&self, form: &FormState) -> Result<Option<Client>, ApiError> {
            self.check()?;
            let id = match form.mode {
                FormMode::Create => 100,
                FormMode::Edit(id) => id,
            };
            Ok(Some(client(id, &form.text(0), "saved@example.com")))
        }

        async fn delete(&self, _id: i64) -> Result<(), ApiError> {
            self.check()
        }
    }

    fn view_with(count: i64) -> ListView<Client> {
        let mut view = ListView::new(config(Resync::ApplyReturned));
        view.finish_load(Ok(numbered(count)));
        view
    }

    fn ids(rows: Vec<&Client>) -> Vec<i64> {
        rows.into_iter().map(|c| c.id).collect()
    }

    #[test]
    fn twelve_clients_page_size_five() {
        let mut view = view_with(12);
        assert_eq!(view.page_count(), 3);
        assert_eq!(ids(view.page_items()), vec![1, 2, 3, 4, 5]);

        view.next_page();
        view.next_page();
        assert_eq!(view.page(), 3);
        assert_eq!(ids(view.page_items()), vec![11, 12]);

        view.next_page();
        assert_eq!(view.page(), 3);
        view.go_to_page(0);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn page_count_is_ceiling_for_every_length() {
        for size in 1..=8usize {
            for len in 0..=20i64 {
                let mut view = ListView::new(ListConfig { page_size: size, ..config(Resync::ApplyReturned) });
                view.finish_load(Ok(numbered(len)));
                let expected = (len as usize).div_ceil(size);
                assert_eq!(view.page_count(), expected, "len={len} size={size}");

                for k in 1..=expected {
                    view.go_to_page(k);
                    let start = (k - 1) * size;
                    let end = (k * size).min(len as usize);
                    let want: Vec<i64> = (start as i64 + 1..=end as i64).collect();
                    assert_eq!(ids(view.page_items()), want);
                }
            }
        }
    }

    #[test]
    fn search_is_a_case_insensitive_subset() {
        let mut view = ListView::new(config(Resync::ApplyReturned));
        view.finish_load(Ok(vec![
            client(1, "Alice Martin", "alice@example.com"),
            client(2, "Bruno Petit", "bruno@MARTIN.fr"),
            client(3, "Chloé Durand", "chloe@example.com"),
        ]));

        for term in ["", "martin", "MARTIN", "example", "zzz", "é"] {
            view.set_search(term);
            let needle = term.to_lowercase();
            let expected: Vec<i64> = view
                .items()
                .iter()
                .filter(|c| c.name.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle))
                .map(|c| c.id)
                .collect();
            assert_eq!(ids(view.filtered()), expected, "term={term}");
        }

        view.set_search("martin");
        assert_eq!(ids(view.filtered()), vec![1, 2]);
    }

    #[test]
    fn whitespace_in_the_search_is_matched_literally() {
        let mut view = ListView::new(config(Resync::ApplyReturned));
        view.finish_load(Ok(vec![
            client(1, "Alice Martin", "alice@example.com"),
            client(2, "Bruno", "bruno@example.com"),
        ]));

        view.set_search("Bruno ");
        assert!(view.filtered().is_empty());
        view.set_search(" ");
        assert_eq!(ids(view.filtered()), vec![1]);
        view.set_search("e m");
        assert_eq!(ids(view.filtered()), vec![1]);
    }

    #[test]
    fn changing_the_search_resets_to_first_page() {
        let mut view = view_with(12);
        view.go_to_page(3);
        view.push_search('c');
        assert_eq!(view.page(), 1);

        view.go_to_page(2);
        view.pop_search();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn failed_load_shows_message_and_empty_list() {
        let mut view = view_with(4);
        view.begin_load();
        assert!(view.is_loading());
        view.finish_load(Err(ApiError::Http { status: 404, message: None }));
        assert!(!view.is_loading());
        assert!(view.items().is_empty());
        assert_eq!(view.error(), Some("Ressource non trouvée."));
    }

    #[tokio::test]
    async fn confirmed_delete_removes_exactly_one_row() {
        let mut controller = ListController::new(FakeOps::new(numbered(7)), config(Resync::ApplyReturned));
        controller.load().await;
        controller.view.next();
        controller.view.next();
        assert_eq!(controller.view.selected().map(|c| c.id), Some(3));

        assert_eq!(controller.handle_key(KeyCode::Char('d')), None);
        assert_eq!(controller.view.pending_delete(), Some(3));
        let command = controller.handle_key(KeyCode::Char('y')).unwrap();
        controller.run(command).await;

        assert_eq!(ids(controller.view.items().iter().collect()), vec![1, 2, 4, 5, 6, 7]);
        assert_eq!(controller.view.pending_delete(), None);
    }

    #[tokio::test]
    async fn declined_delete_changes_nothing() {
        let mut controller = ListController::new(FakeOps::new(numbered(3)), config(Resync::ApplyReturned));
        controller.load().await;
        controller.handle_key(KeyCode::Char('d'));
        assert_eq!(controller.handle_key(KeyCode::Char('n')), None);
        assert_eq!(controller.view.items().len(), 3);
        assert!(!controller.view.captures_input());
    }

    #[tokio::test]
    async fn failed_mutations_keep_the_list() {
        let mut controller = ListController::new(FakeOps::new(numbered(6)), config(Resync::ApplyReturned));
        controller.load().await;
        let before = controller.view.items().to_vec();
        controller.ops.fail = true;

        controller.handle_key(KeyCode::Char('d'));
        controller.confirm_delete().await;
        assert_eq!(controller.view.items(), before.as_slice());
        assert_eq!(controller.view.alert(), Some("Erreur serveur interne. Consultez les logs du backend."));

        controller.handle_key(KeyCode::Enter);
        controller.open_edit();
        controller.submit().await;
        assert_eq!(controller.view.items(), before.as_slice());
        assert!(controller.view.modal().is_some());
    }

    #[tokio::test]
    async fn create_and_edit_apply_the_returned_row() {
        let mut controller = ListController::new(FakeOps::new(numbered(2)), config(Resync::ApplyReturned));
        controller.load().await;

        controller.handle_key(KeyCode::Char('n'));
        assert_eq!(controller.view.modal().map(|f| f.text(0)), Some(String::new()));
        controller.handle_key(KeyCode::Enter);
        for c in "Zoé".chars() {
            controller.handle_key(KeyCode::Char(c));
        }
        controller.handle_key(KeyCode::Enter);
        let command = controller.handle_key(KeyCode::Char('s')).unwrap();
        controller.run(command).await;
        assert!(controller.view.modal().is_none());
        assert_eq!(controller.view.items().last().map(|c| c.name.as_str()), Some("Zoé"));

        controller.view.go_to_page(1);
        controller.handle_key(KeyCode::Char('e'));
        assert_eq!(controller.view.modal().map(|f| f.text(0)), Some("Client 01".to_string()));
        controller.submit().await;
        assert_eq!(controller.view.items().len(), 3);
        assert_eq!(controller.view.items()[0].email, "saved@example.com");
        assert_eq!(controller.ops.fetches.get(), 1);
    }

    #[tokio::test]
    async fn refetch_policy_reloads_after_mutations() {
        let mut controller = ListController::new(FakeOps::new(numbered(3)), config(Resync::Refetch));
        controller.load().await;
        controller.handle_key(KeyCode::Char('d'));
        controller.confirm_delete().await;
        assert_eq!(controller.ops.fetches.get(), 2);
        // The fake keeps its rows, so the refetched list is complete again.
        assert_eq!(controller.view.items().len(), 3);
    }

    #[tokio::test]
    async fn search_mode_captures_keys() {
        let mut controller = ListController::new(FakeOps::new(numbered(12)), config(Resync::ApplyReturned));
        controller.load().await;
        controller.handle_key(KeyCode::Char('/'));
        assert!(controller.view.captures_input());
        for c in "client 1".chars() {
            assert_eq!(controller.handle_key(KeyCode::Char(c)), None);
        }
        controller.handle_key(KeyCode::Esc);
        assert!(!controller.view.captures_input());
        assert_eq!(ids(controller.view.filtered()), vec![10, 11, 12]);
        assert_eq!(controller.handle_key(KeyCode::Char('a')), Some(ListCommand::Extra('a')));
    }
}
