use rocket::{routes, Build, Rocket};

use std::sync::Arc;

pub mod accounts;
pub mod blocks;
pub mod data;
pub mod error;
pub mod events;
pub mod goals;
pub mod milestones;
pub mod schema;
pub mod sync;
pub mod tasks;

use data::DBConnection;
use events::ChangeBus;

pub fn rocket(db_connection: DBConnection, bus: Arc<ChangeBus>) -> Rocket<Build> {
    rocket::build().manage(db_connection).manage(bus).mount(
        "/api",
        routes![
            accounts::endpoints::get_profile,
            accounts::endpoints::set_display_name,
            accounts::endpoints::delete_account,
            tasks::endpoints::get_tasks,
            tasks::endpoints::add_task,
            tasks::endpoints::set_task_completion,
            tasks::endpoints::delete_task,
            blocks::endpoints::get_blocks,
            blocks::endpoints::add_block,
            blocks::endpoints::delete_block,
            goals::endpoints::get_goals,
            goals::endpoints::add_goal,
            goals::endpoints::set_goal_completion,
            goals::endpoints::delete_goal,
            milestones::endpoints::get_milestones,
            milestones::endpoints::add_milestone,
            milestones::endpoints::set_milestone_completion,
            milestones::endpoints::delete_milestone,
            events::events,
        ],
    )
}
