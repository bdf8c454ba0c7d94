use std::sync::Arc;
use std::time::Instant;

use olahire::access::{Decision, Screen};
use olahire::config::UiConfig;
use olahire::error::AppError;
use olahire::jobs::{JobBoard, PostedJobsDesk};
use olahire::listing::FilterCriteria;
use olahire::nav::Navigator;
use olahire::remote::{
    fields, ApplicationStatus, InMemoryRemote, JobNumber, RemoteCollaborator, RemoteError,
};
use olahire::review::{EditKey, MatchBand, ReviewDesk, ReviewError};
use olahire::session::{ApplicantId, SessionStore};

/// Scripted pass over the seeded in-memory backend, walking both sides of
/// the marketplace through the same cores the real client uses.
pub(crate) async fn run() -> Result<(), AppError> {
    let remote = Arc::new(InMemoryRemote::seeded());
    let store = Arc::new(SessionStore::new());
    let mut nav = Navigator::new(store.clone());
    let ui = UiConfig::default();

    println!("OlaHire client core demo");

    println!("\nAnonymous visitor");
    match nav.navigate(Screen::Jobs) {
        Decision::Allow => println!("  jobs screen allowed (unexpected)"),
        Decision::Redirect(target) => {
            println!("  jobs screen denied, redirected to {}", target.label())
        }
    }

    println!("\nApplicant portal");
    let grant = remote.login("ada@example.com", "hunter22").await?;
    println!("  logged in as {}", grant.display_name);
    store.establish(grant.clone().applicant_session())?;
    let applicant_id = ApplicantId(grant.id.clone());
    // Outbound calls take their bearer token from the store, same as the
    // real client.
    let token = store.credential().ok_or(RemoteError::Unauthorized)?;
    nav.navigate(Screen::Jobs);

    let mut board = JobBoard::new(remote.clone(), &ui);
    board.load().await?;
    println!("  open jobs: {}", board.list().items().len());
    for job in board.list().visible().items {
        println!(
            "    {} — {} @ {} ({})",
            job.job_number, job.title, job.company, job.salary_estimate
        );
    }

    let now = Instant::now();
    board.list_mut().set_criteria(
        FilterCriteria::new()
            .with_text("eng")
            .with_numeric_range(fields::SALARY, 50_000, 200_000),
        now,
    );
    board.list_mut().poll(now + ui.quiet_interval());
    println!("  after filtering for \"eng\" at $50k-$200k:");
    for job in board.list().visible().items {
        println!("    {} ({})", job.title, job.salary_estimate);
    }

    println!("  my applications:");
    for row in board.my_applications(&applicant_id, &token).await? {
        println!(
            "    {} — match {:.0}%: {}",
            row.job_title,
            row.match_percent * 100.0,
            MatchBand::of(row.match_percent).label()
        );
    }

    println!("\nAdmin portal");
    let grant = remote.admin_login("bill@initech.example", "tps-reports").await?;
    let company = grant.company.clone().unwrap_or_default();
    println!("  logged in as {} for {}", grant.display_name, company);
    store.establish(grant.clone().admin_session())?;
    let admin_token = store.credential().ok_or(RemoteError::Unauthorized)?;
    nav.navigate(Screen::Applicants);

    let mut desk = ReviewDesk::new(remote.clone(), &ui);
    desk.load(&company, &admin_token).await?;
    println!("  applicant matches (best first):");
    for row in desk.list().visible().items {
        println!(
            "    {} for {} — match {:.0}%: {}",
            row.applicant_id,
            row.job_title,
            row.match_percent * 100.0,
            MatchBand::of(row.match_percent).label()
        );
    }

    let key = EditKey {
        applicant_id: applicant_id.clone(),
        job_number: JobNumber("J-1001".to_string()),
    };
    desk.stage_status(key.clone(), ApplicationStatus::SelectedForInterview);
    remote.fail_next_status_put();
    match desk.commit_status(&key, &admin_token).await {
        Ok(()) => println!("  status committed"),
        Err(err) => println!("  commit failed ({err}); staged edit kept for retry"),
    }
    match desk.commit_status(&key, &admin_token).await {
        Ok(()) => println!(
            "  retry committed: {} is now \"{}\"",
            key.applicant_id,
            ApplicationStatus::SelectedForInterview.label()
        ),
        Err(ReviewError::Remote(err)) => return Err(err.into()),
        Err(ReviewError::NothingStaged) => println!("  nothing left to commit"),
    }

    let mut posted = PostedJobsDesk::new(remote.clone());
    posted.load(&company, &admin_token).await?;
    posted.set_query("staff");
    println!("  posted jobs matching \"staff\":");
    for job in posted.visible() {
        println!("    {} — {}", job.job_number, job.title);
    }

    println!("\nLogout");
    store.clear();
    let decision = nav.on_unauthorized();
    println!(
        "  session cleared; current screen resolves to {}",
        match decision {
            Decision::Allow => nav.current().label(),
            Decision::Redirect(target) => target.label(),
        }
    );

    Ok(())
}
