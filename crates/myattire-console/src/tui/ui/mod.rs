/*
[INPUT]:  TUI app state and rendering snapshots for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding panels or changing exports
*/

mod dashboard;
mod layout;
mod login;
mod logs;
mod sectors;
mod tasks;
mod users;

pub mod modal;

pub(in crate::tui) use dashboard::draw_dashboard;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use login::draw_login;
pub(in crate::tui) use logs::draw_logs;
pub(in crate::tui) use sectors::draw_sectors_table;
pub(in crate::tui) use tasks::draw_tasks;
pub(in crate::tui) use users::draw_users_table;
