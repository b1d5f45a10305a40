use crowdcontrol::{Credentials, CrowdClient, Either};
use std::env;

/// Authenticates a user and checks one group membership against a live Crowd.
///
/// Usage: `cargo run --example check_user -- <username> <password> <group>`
#[tokio::main]
async fn main() {
    let base_url = env::var("CROWD_BASE_URL").expect("CROWD_BASE_URL environment variable not set");
    let app_name = env::var("CROWD_APP_NAME").expect("CROWD_APP_NAME environment variable not set");
    let app_password =
        env::var("CROWD_APP_PASSWORD").expect("CROWD_APP_PASSWORD environment variable not set");

    let args: Vec<String> = env::args().skip(1).collect();
    let [username, password, group] = args.as_slice() else {
        eprintln!("usage: check_user <username> <password> <group>");
        return;
    };

    let credentials = Credentials::new(base_url, app_name, app_password)
        .expect("invalid Crowd credentials");
    let client = CrowdClient::new(credentials);

    match client.authenticate(username, password).await {
        Ok(Either::Value(user)) => println!("Authenticated: {user:#?}"),
        Ok(Either::Error(error)) => println!("Rejected: {error}"),
        Err(e) => println!("{e:#?}"),
    }

    match client.direct_membership(username, group).await {
        Ok(Either::Value(group)) => println!("Member of: {group:#?}"),
        Ok(Either::Error(error)) => println!("Not a member: {error}"),
        Err(e) => println!("{e:#?}"),
    }
}
