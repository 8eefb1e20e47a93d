mod index_view;

pub use index_view::render_page;
