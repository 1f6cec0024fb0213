//! Team management screen

use cf_core::ServiceResult;
use cf_services::{CreateTeam, UpdateTeam};

use crate::prompt;
use crate::App;

pub async fn menu(app: &App) {
    loop {
        println!();
        println!("TEAM MANAGEMENT");
        println!("1. Create New Team");
        println!("2. View All Teams");
        println!("3. View Team Details");
        println!("4. Update Team");
        println!("5. Delete Team");
        println!("6. Back to Main Menu");
        print!("Enter your choice (1-6): ");

        match prompt::menu_choice(1, 6) {
            1 => create(app).await,
            2 => list(app).await,
            3 => details(app).await,
            4 => update(app).await,
            5 => delete(app).await,
            _ => return,
        }
        prompt::pause();
    }
}

async fn create(app: &App) {
    println!("\nCREATE NEW TEAM");

    let request = CreateTeam {
        team_code: prompt::required("Team Code (required): "),
        team_name: prompt::required("Team Name (required): "),
        tech_stack_codes: prompt::code_list("Tech Stack Codes (comma-separated): "),
    };

    println!("\nCreating team...");
    match app.teams.create(request).await {
        ServiceResult::Success { data, .. } => {
            println!("Successfully created team!");
            println!("Team ID: {}", data.team.team_id);
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn list(app: &App) {
    println!("\nLIST ALL TEAMS");

    match app.teams.all().await {
        ServiceResult::Success { data, .. } if !data.is_empty() => {
            println!("\nTeams:");
            for team in &data {
                println!(
                    "ID: {}, Code: {}, Name: {}",
                    team.team_id, team.team_code, team.team_name
                );
            }
        }
        ServiceResult::Success { .. } => println!("No teams found."),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn details(app: &App) {
    println!("\nVIEW TEAM DETAILS");
    let team_id = prompt::required("Enter Team ID: ");

    match app.teams.get(&team_id).await {
        ServiceResult::Success { data, .. } => {
            println!("\nTeam Details:");
            println!("ID: {}", data.team.team_id);
            println!("Code: {}", data.team.team_code);
            println!("Name: {}", data.team.team_name);
            if data.tech_stack_codes.is_empty() {
                println!("Tech Stacks: none");
            } else {
                println!("Tech Stacks: {}", data.tech_stack_codes.join(", "));
            }
            show_members(app, &data.team.team_code).await;
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn show_members(app: &App, team_code: &str) {
    match app.team_users.members_of(team_code).await {
        ServiceResult::Success { data, .. } if !data.is_empty() => {
            println!("Members:");
            for member in &data {
                let rating = member
                    .user_rating
                    .map(|r| r.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "  - {} ({}, rating: {})",
                    member.user_name, member.user_code, rating
                );
            }
        }
        ServiceResult::Success { .. } => println!("Members: none"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn update(app: &App) {
    println!("\nUPDATE TEAM");
    let team_id = prompt::required("Enter Team ID: ");

    let request = UpdateTeam {
        team_name: prompt::required("Team Name (required): "),
        tech_stack_codes: prompt::code_list("Tech Stack Codes (comma-separated): "),
    };

    println!("\nUpdating team...");
    match app.teams.update(&team_id, request).await {
        ServiceResult::Success { .. } => println!("Successfully updated team!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn delete(app: &App) {
    println!("\nDELETE TEAM");
    let team_id = prompt::required("Enter Team ID: ");

    println!("\nDeleting team...");
    match app.teams.delete(&team_id).await {
        ServiceResult::Success { .. } => println!("Successfully deleted team!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}
