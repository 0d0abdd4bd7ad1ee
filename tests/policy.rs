use rusqlite::Connection;

use momentum::accounts::helpers::{
    delete_account_from_db, ensure_profile, get_profile_from_db, update_display_name,
};
use momentum::blocks::data::TimeBlock;
use momentum::blocks::helpers::{add_block_to_db, get_blocks_for_day};
use momentum::error::StoreError;
use momentum::goals::data::{GoalType, NewGoal};
use momentum::goals::helpers::{add_goal_to_db, delete_goal_from_db, get_goals_from_db};
use momentum::milestones::data::NewMilestone;
use momentum::milestones::helpers::{add_milestone_to_db, get_milestones_from_db};
use momentum::schema::create_tables;
use momentum::tasks::data::NewTask;
use momentum::tasks::helpers::{
    add_task_to_db, delete_task_from_db, get_tasks_for_day, update_task_completion,
};

fn open_db() -> Connection {
    let connection = Connection::open_in_memory().unwrap();
    create_tables(&connection).unwrap();
    connection
}

fn owner(db: &Connection, name: &str) -> String {
    let owner = name.to_string();
    ensure_profile(&owner, db).unwrap();
    owner
}

fn new_task(owner: &str, title: &str, date: &str) -> NewTask {
    NewTask {
        owner_id: owner.to_string(),
        title: title.to_string(),
        task_date: date.to_string(),
        alarm_time: None,
    }
}

fn new_goal(owner: &str, title: &str, goal_type: GoalType) -> NewGoal {
    NewGoal {
        owner_id: owner.to_string(),
        title: title.to_string(),
        description: None,
        goal_type,
        target_date: None,
    }
}

#[test]
fn queries_never_return_foreign_rows() {
    let db = open_db();
    let ana = owner(&db, "ana");
    let ben = owner(&db, "ben");

    add_task_to_db(&ana, &new_task(&ana, "water the plants", "2026-08-29"), &db).unwrap();
    add_task_to_db(&ben, &new_task(&ben, "file taxes", "2026-08-29"), &db).unwrap();
    add_goal_to_db(&ana, &new_goal(&ana, "Run a marathon", GoalType::Yearly), &db).unwrap();

    let ana_tasks = get_tasks_for_day(&ana, "2026-08-29", &db).unwrap();
    assert_eq!(ana_tasks.len(), 1);
    assert!(ana_tasks.iter().all(|(_, task)| task.owner_id == ana));

    let ben_goals = get_goals_from_db(&ben, &db).unwrap();
    assert!(ben_goals.is_empty());
}

#[test]
fn insert_with_foreign_owner_is_denied() {
    let db = open_db();
    let ana = owner(&db, "ana");
    let ben = owner(&db, "ben");

    let result = add_task_to_db(&ana, &new_task(&ben, "sneaky", "2026-08-29"), &db);

    assert!(matches!(result, Err(StoreError::PolicyDenied)));
    assert!(get_tasks_for_day(&ben, "2026-08-29", &db).unwrap().is_empty());
}

#[test]
fn day_filter_scopes_task_reads() {
    let db = open_db();
    let ana = owner(&db, "ana");

    add_task_to_db(&ana, &new_task(&ana, "today", "2026-08-29"), &db).unwrap();
    add_task_to_db(&ana, &new_task(&ana, "tomorrow", "2026-08-30"), &db).unwrap();

    let today = get_tasks_for_day(&ana, "2026-08-29", &db).unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].1.title, "today");
}

#[test]
fn tasks_are_ordered_by_creation_ascending() {
    let db = open_db();
    let ana = owner(&db, "ana");

    add_task_to_db(&ana, &new_task(&ana, "first", "2026-08-29"), &db).unwrap();
    add_task_to_db(&ana, &new_task(&ana, "second", "2026-08-29"), &db).unwrap();
    add_task_to_db(&ana, &new_task(&ana, "third", "2026-08-29"), &db).unwrap();

    let titles: Vec<String> = get_tasks_for_day(&ana, "2026-08-29", &db)
        .unwrap()
        .into_iter()
        .map(|(_, task)| task.title)
        .collect();

    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn goals_are_ordered_by_creation_descending() {
    let db = open_db();
    let ana = owner(&db, "ana");

    add_goal_to_db(&ana, &new_goal(&ana, "older", GoalType::Yearly), &db).unwrap();
    add_goal_to_db(&ana, &new_goal(&ana, "newer", GoalType::Monthly), &db).unwrap();

    let titles: Vec<String> = get_goals_from_db(&ana, &db)
        .unwrap()
        .into_iter()
        .map(|(_, goal)| goal.title)
        .collect();

    assert_eq!(titles, vec!["newer", "older"]);
}

#[test]
fn new_records_start_uncompleted() {
    let db = open_db();
    let ana = owner(&db, "ana");

    add_goal_to_db(&ana, &new_goal(&ana, "Learn Spanish", GoalType::Yearly), &db).unwrap();

    let goals = get_goals_from_db(&ana, &db).unwrap();
    assert_eq!(goals[0].1.goal_type, GoalType::Yearly);
    assert!(!goals[0].1.completed);
}

#[test]
fn completion_update_on_foreign_row_reports_no_match() {
    let db = open_db();
    let ana = owner(&db, "ana");
    let ben = owner(&db, "ben");

    let task_id = add_task_to_db(&ana, &new_task(&ana, "water the plants", "2026-08-29"), &db)
        .unwrap();

    let result = update_task_completion(&ben, task_id, true, &db);
    assert!(matches!(result, Err(StoreError::RowNotFound)));

    let tasks = get_tasks_for_day(&ana, "2026-08-29", &db).unwrap();
    assert!(!tasks[0].1.completed);
}

#[test]
fn delete_is_owner_scoped() {
    let db = open_db();
    let ana = owner(&db, "ana");
    let ben = owner(&db, "ben");

    let task_id = add_task_to_db(&ana, &new_task(&ana, "water the plants", "2026-08-29"), &db)
        .unwrap();

    assert!(matches!(
        delete_task_from_db(&ben, task_id, &db),
        Err(StoreError::RowNotFound)
    ));
    assert_eq!(get_tasks_for_day(&ana, "2026-08-29", &db).unwrap().len(), 1);

    delete_task_from_db(&ana, task_id, &db).unwrap();
    assert!(get_tasks_for_day(&ana, "2026-08-29", &db).unwrap().is_empty());
}

#[test]
fn deleting_goal_cascades_only_its_milestones() {
    let db = open_db();
    let ana = owner(&db, "ana");

    let goal_id = add_goal_to_db(&ana, &new_goal(&ana, "Learn Spanish", GoalType::Yearly), &db)
        .unwrap();

    add_milestone_to_db(
        &ana,
        &NewMilestone {
            owner_id: ana.clone(),
            title: "Finish A1 course".to_string(),
            description: None,
            target_date: None,
            goal_id: Some(goal_id),
        },
        &db,
    )
    .unwrap();
    add_milestone_to_db(
        &ana,
        &NewMilestone {
            owner_id: ana.clone(),
            title: "Unassociated milestone".to_string(),
            description: None,
            target_date: None,
            goal_id: None,
        },
        &db,
    )
    .unwrap();

    let cascaded = delete_goal_from_db(&ana, goal_id, &db).unwrap();
    assert_eq!(cascaded, 1);

    let remaining = get_milestones_from_db(&ana, &db).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].1.title, "Unassociated milestone");
    assert_eq!(remaining[0].1.goal_id, None);
}

#[test]
fn milestone_cannot_reference_foreign_goal() {
    let db = open_db();
    let ana = owner(&db, "ana");
    let ben = owner(&db, "ben");

    let ana_goal = add_goal_to_db(&ana, &new_goal(&ana, "Run a marathon", GoalType::Yearly), &db)
        .unwrap();

    let result = add_milestone_to_db(
        &ben,
        &NewMilestone {
            owner_id: ben.clone(),
            title: "Ride along".to_string(),
            description: None,
            target_date: None,
            goal_id: Some(ana_goal),
        },
        &db,
    );

    assert!(matches!(result, Err(StoreError::RowNotFound)));
    assert!(get_milestones_from_db(&ben, &db).unwrap().is_empty());
}

#[test]
fn overlapping_time_blocks_are_admitted() {
    let db = open_db();
    let ana = owner(&db, "ana");

    let block = |title: &str, start: &str, end: &str| TimeBlock {
        owner_id: ana.clone(),
        title: title.to_string(),
        block_date: "2026-08-29".to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        description: None,
    };

    add_block_to_db(&ana, &block("Deep work", "09:00", "10:00"), &db).unwrap();
    add_block_to_db(&ana, &block("Standup", "09:30", "10:30"), &db).unwrap();

    let blocks = get_blocks_for_day(&ana, "2026-08-29", &db).unwrap();
    assert_eq!(blocks.len(), 2);
    // Ordered by start time.
    assert_eq!(blocks[0].1.start_time, "09:00");
    assert_eq!(blocks[1].1.start_time, "09:30");
}

#[test]
fn validation_rejects_incomplete_drafts_before_any_write() {
    let db = open_db();
    let ana = owner(&db, "ana");

    assert!(matches!(
        add_task_to_db(&ana, &new_task(&ana, "  ", "2026-08-29"), &db),
        Err(StoreError::Validation("title"))
    ));

    let missing_end = TimeBlock {
        owner_id: ana.clone(),
        title: "Deep work".to_string(),
        block_date: "2026-08-29".to_string(),
        start_time: "09:00".to_string(),
        end_time: "".to_string(),
        description: None,
    };
    assert!(matches!(
        add_block_to_db(&ana, &missing_end, &db),
        Err(StoreError::Validation("end_time"))
    ));

    assert!(get_tasks_for_day(&ana, "2026-08-29", &db).unwrap().is_empty());
    assert!(get_blocks_for_day(&ana, "2026-08-29", &db).unwrap().is_empty());
}

#[test]
fn profile_materialization_is_idempotent() {
    let db = open_db();
    let ana = owner(&db, "ana");

    update_display_name(&ana, "Ana", &db).unwrap();
    // A later authenticated request re-runs the hook; the row must survive
    // untouched.
    ensure_profile(&ana, &db).unwrap();

    let profile = get_profile_from_db(&ana, &db).unwrap();
    assert_eq!(profile.display_name, "Ana");
}

#[test]
fn profile_defaults_to_empty_display_name() {
    let db = open_db();
    let ana = owner(&db, "ana");

    let profile = get_profile_from_db(&ana, &db).unwrap();
    assert_eq!(profile.display_name, "");
}

#[test]
fn deleting_account_cascades_every_record_type() {
    let db = open_db();
    let ana = owner(&db, "ana");
    let ben = owner(&db, "ben");

    add_task_to_db(&ana, &new_task(&ana, "water the plants", "2026-08-29"), &db).unwrap();
    let goal_id = add_goal_to_db(&ana, &new_goal(&ana, "Learn Spanish", GoalType::Yearly), &db)
        .unwrap();
    add_milestone_to_db(
        &ana,
        &NewMilestone {
            owner_id: ana.clone(),
            title: "Finish A1 course".to_string(),
            description: None,
            target_date: None,
            goal_id: Some(goal_id),
        },
        &db,
    )
    .unwrap();
    add_task_to_db(&ben, &new_task(&ben, "file taxes", "2026-08-29"), &db).unwrap();

    delete_account_from_db(&ana, &db).unwrap();

    assert!(get_tasks_for_day(&ana, "2026-08-29", &db).unwrap().is_empty());
    assert!(get_goals_from_db(&ana, &db).unwrap().is_empty());
    assert!(get_milestones_from_db(&ana, &db).unwrap().is_empty());
    assert_eq!(get_tasks_for_day(&ben, "2026-08-29", &db).unwrap().len(), 1);
}

#[test]
fn schema_creation_is_idempotent_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("momentum.db");

    {
        let db = Connection::open(&path).unwrap();
        create_tables(&db).unwrap();
        let ana = owner(&db, "ana");
        add_task_to_db(&ana, &new_task(&ana, "water the plants", "2026-08-29"), &db).unwrap();
    }

    let db = Connection::open(&path).unwrap();
    create_tables(&db).unwrap();

    let ana = "ana".to_string();
    assert_eq!(get_tasks_for_day(&ana, "2026-08-29", &db).unwrap().len(), 1);
}
