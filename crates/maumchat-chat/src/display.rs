use maumchat_types::Role;

/// Display handle that can be rewritten in place while a reply streams
pub trait UpdatableRegion {
    /// Replace the region's content with `text`
    fn update(&mut self, text: &str);
}

/// Surface the chat session renders to.
///
/// Implementations decide how things look; the session only decides what
/// is shown and in which order.
pub trait ChatDisplay {
    /// Show a complete message below everything rendered so far
    fn render_message(&mut self, role: Role, content: &str);

    /// Open a region for an assistant reply that is still arriving
    fn create_updatable_region(&mut self) -> Box<dyn UpdatableRegion + '_>;

    /// Show a user-visible failure notice
    fn show_error(&mut self, text: &str);
}
