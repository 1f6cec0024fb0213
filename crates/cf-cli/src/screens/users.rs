//! User management screen

use cf_core::{PageRequest, ServiceResult};
use cf_services::{CreateUser, UpdateUser};

use super::display_opt;
use crate::prompt;
use crate::App;

pub async fn menu(app: &App) {
    loop {
        println!();
        println!("USER MANAGEMENT");
        println!("1. Create New User");
        println!("2. View All Users");
        println!("3. View User Details");
        println!("4. Update User");
        println!("5. Delete User");
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
    println!("\nCREATE NEW USER");

    let request = CreateUser {
        user_name: prompt::required("User Name (required): "),
        github_account_name: prompt::optional("GitHub Username: "),
        nrc: prompt::optional("NRC Number: "),
        mobile_no: prompt::optional("Mobile Number: "),
        tech_stack_codes: prompt::code_list("Tech Stack Codes (comma-separated): "),
    };

    println!("\nCreating user...");
    match app.users.create(request).await {
        ServiceResult::Success { data, .. } => {
            println!("Successfully created user!");
            println!("User ID: {}", data.user.user_id);
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn list(app: &App) {
    println!("\nLIST ALL USERS");

    let page = PageRequest::new(1, 50);
    match app.users.list(&page, None).await {
        ServiceResult::Success { data, .. } if !data.items.is_empty() => {
            println!("\nUsers (page {} of {} total):", data.page, data.total_count);
            for entry in &data.items {
                println!(
                    "ID: {}, Code: {}, Name: {}",
                    entry.user.user_id, entry.user.user_code, entry.user.user_name
                );
            }
        }
        ServiceResult::Success { .. } => println!("No users found."),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn details(app: &App) {
    println!("\nVIEW USER DETAILS");
    let user_id = prompt::required("Enter User ID: ");

    match app.users.get(&user_id).await {
        ServiceResult::Success { data, .. } => {
            println!("\nUser Details:");
            println!("ID: {}", data.user.user_id);
            println!("Code: {}", data.user.user_code);
            println!("Name: {}", data.user.user_name);
            println!("GitHub: {}", display_opt(&data.user.github_account_name));
            println!("NRC: {}", display_opt(&data.user.nrc));
            println!("Mobile: {}", display_opt(&data.user.mobile_no));
            if data.tech_stacks.is_empty() {
                println!("Tech Stacks: none");
            } else {
                println!("Tech Stacks:");
                for stack in &data.tech_stacks {
                    let level = display_opt(&stack.proficiency_level);
                    println!(
                        "  - {} ({}, level: {})",
                        stack.tech_stack_name, stack.tech_stack_code, level
                    );
                }
            }
        }
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn update(app: &App) {
    println!("\nUPDATE USER");
    let user_id = prompt::required("Enter User ID: ");

    let request = UpdateUser {
        user_name: prompt::required("User Name (required): "),
        github_account_name: prompt::optional("GitHub Username: "),
        nrc: prompt::optional("NRC Number: "),
        mobile_no: prompt::optional("Mobile Number: "),
        tech_stack_codes: prompt::code_list("Tech Stack Codes (comma-separated): "),
    };

    println!("\nUpdating user...");
    match app.users.update(&user_id, request).await {
        ServiceResult::Success { .. } => println!("Successfully updated user!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}

async fn delete(app: &App) {
    println!("\nDELETE USER");
    let user_id = prompt::required("Enter User ID: ");

    println!("\nDeleting user...");
    match app.users.delete(&user_id).await {
        ServiceResult::Success { .. } => println!("Successfully deleted user!"),
        other => prompt::show_error(other.message().unwrap_or("Unknown error")),
    }
}
