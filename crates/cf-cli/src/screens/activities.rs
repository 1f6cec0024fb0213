//! Activity logging screen

use cf_core::ServiceResult;
use cf_db::ActivityRow;
use cf_services::NewActivity;

use crate::prompt;
use crate::App;

pub async fn menu(app: &App) {
    loop {
        println!();
        println!("ACTIVITY MANAGEMENT");
        println!("1. Log New Activity");
        println!("2. View Activities");
        println!("3. View Activity Details");
        println!("4. Update Activity");
        println!("5. Delete Activity");
        println!("6. Back to Main Menu");
        print!("Enter your choice (1-6): ");

        match prompt::menu_choice(1, 6) {
            1 => log(app).await,
            2 => list(app).await,
            3 => details(app).await,
            4 => update(app).await,
            5 => delete(app).await,
            _ => return,
        }
        prompt::pause();
    }
}

async fn log(app: &App) {
    println!("\nLOG NEW ACTIVITY");

    let request = NewActivity {
        project_code: prompt::required("Project Code (required): "),
        team_code: prompt::required("Team Code (required): "),
        activity_date: prompt::date("Activity Date (yyyy-mm-dd, blank = today): ")
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        tasks: prompt::required("Tasks Completed (required): "),
    };

    println!("\nLogging activity...");
    match app.activities.log(request).await {
        ServiceResult::Success { data, .. } => {
            println!("Successfully logged activity!");
            println!("Activity ID: {}", data.project_team_activity_id);
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn list(app: &App) {
    println!("\nVIEW ACTIVITIES");
    let project = prompt::optional("Filter by Project Code (blank for all): ");
    let team = prompt::optional("Filter by Team Code (blank for all): ");

    match app.activities.list(project.as_deref(), team.as_deref()).await {
        ServiceResult::Success { data, .. } if !data.is_empty() => {
            println!("\nActivities:");
            for activity in &data {
                println!(
                    "[{}] {} / {} - {}",
                    activity.activity_date,
                    activity.project_name,
                    activity.team_name,
                    activity.tasks
                );
            }
        }
        ServiceResult::Success { .. } => println!("No activities found."),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn details(app: &App) {
    println!("\nVIEW ACTIVITY DETAILS");
    let activity_id = prompt::required("Enter Activity ID: ");

    match app.activities.get(&activity_id).await {
        ServiceResult::Success { data, .. } => {
            println!("\nActivity Details:");
            println!("ID: {}", data.project_team_activity_id);
            println!("Project: {} ({})", data.project_name, data.project_code);
            println!("Team: {} ({})", data.team_name, data.team_code);
            println!("Date: {}", data.activity_date);
            println!("Tasks: {}", data.tasks);
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn update(app: &App) {
    println!("\nUPDATE ACTIVITY");
    let activity_id = prompt::required("Enter Activity ID: ");

    let row = ActivityRow {
        project_team_activity_id: activity_id,
        project_code: prompt::required("Project Code (required): "),
        team_code: prompt::required("Team Code (required): "),
        activity_date: prompt::date("Activity Date (yyyy-mm-dd, blank = today): ")
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        tasks: prompt::required("Tasks Completed (required): "),
    };

    println!("\nUpdating activity...");
    match app.activities.update(row).await {
        ServiceResult::Success { .. } => println!("Successfully updated activity!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn delete(app: &App) {
    println!("\nDELETE ACTIVITY");
    let activity_id = prompt::required("Enter Activity ID: ");

    println!("\nDeleting activity...");
    match app.activities.delete(&activity_id).await {
        ServiceResult::Success { .. } => println!("Successfully deleted activity!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}
