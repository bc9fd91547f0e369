use clap::{Parser, Subcommand};
use linkedicci::config::init_config;
use linkedicci::error::Error;
use linkedicci::models::application::ApplicationStatus;
use linkedicci::models::offer::Offer;
use linkedicci::screens::applicants::{
    ApplicantsScreen, ConfirmOutcome, DecisionAction, ACCEPT_WARNING,
};
use linkedicci::screens::applications::ApplicationsScreen;
use linkedicci::screens::cv::{CvScreen, CvView, NO_CV_MESSAGE, NO_CV_REDIRECT_DELAY, UPDATE_FAILED};
use linkedicci::screens::home::{HomeScreen, OfferForm};
use linkedicci::screens::offer_info::{ApplyAffordance, OfferInfoScreen, MSG_OFFER_NOT_FOUND};
use linkedicci::screens::{
    applications_load_error, cv_load_error, offer_load_error, offers_load_error, user_load_error,
    LOADING,
};
use linkedicci::services::approval_service::CrossOfferCleanup;
use linkedicci::services::auth_service::{RegisterOutcome, MSG_AUTO_LOGIN_FAILED};
use linkedicci::AppContext;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "linkedicci", about = "Cliente del portal de ofertas LinkedICCI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Iniciar sesión
    Login { email: String, password: String },
    /// Crear una cuenta (con inicio de sesión automático)
    Register {
        name: String,
        email: String,
        password: String,
        confirm_password: String,
    },
    /// Cerrar sesión
    Logout,
    /// Datos del usuario autenticado
    Profile,
    /// Listar todas las ofertas
    Offers,
    /// Crear una oferta (solo Jefe de Carrera)
    CreateOffer {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        salary: String,
        #[arg(long)]
        internship: bool,
    },
    /// Ver una oferta
    Offer { id: String },
    /// Postular a una oferta
    Apply {
        offer_id: String,
        #[arg(long)]
        message: String,
    },
    /// Mis postulaciones
    Applications,
    /// Postulantes de una oferta
    Applicants { offer_id: String },
    /// Aceptar o rechazar una postulación pendiente
    Decide {
        offer_id: String,
        application_id: String,
        #[arg(value_parser = parse_action)]
        action: DecisionAction,
        /// Confirmar sin preguntar
        #[arg(long)]
        yes: bool,
    },
    /// Ver o editar el CV
    Cv {
        #[command(subcommand)]
        command: CvCommand,
    },
}

#[derive(Subcommand)]
enum CvCommand {
    Show,
    /// Crear el CV cuando aún no existe
    Create {
        /// Por omisión, el nombre del perfil
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        career: String,
        /// Por omisión, el correo del perfil
        #[arg(long)]
        email: Option<String>,
        #[arg(long, default_value = "")]
        phone: String,
        /// "nombre|url|descripción", repetible
        #[arg(long = "add-project")]
        add_projects: Vec<String>,
        /// "nombre|puntaje(1-5)", repetible
        #[arg(long = "add-skill")]
        add_skills: Vec<String>,
    },
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        career: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// "nombre|url|descripción", repetible
        #[arg(long = "add-project")]
        add_projects: Vec<String>,
        #[arg(long = "remove-project")]
        remove_projects: Vec<usize>,
        /// "nombre|puntaje(1-5)", repetible
        #[arg(long = "add-skill")]
        add_skills: Vec<String>,
        #[arg(long = "remove-skill")]
        remove_skills: Vec<usize>,
    },
}

fn parse_action(raw: &str) -> Result<DecisionAction, String> {
    match raw {
        "accept" | "aceptar" => Ok(DecisionAction::Accept),
        "reject" | "rechazar" => Ok(DecisionAction::Reject),
        other => Err(format!("acción desconocida: {}", other)),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    init_config()?;

    let cli = Cli::parse();
    let ctx = AppContext::new()?;

    match cli.command {
        Command::Login { email, password } => {
            ctx.auth.login(&email, &password).await?;
            let profile = ctx.profile().await?;
            println!("Sesión iniciada como {} ({})", profile.name, profile.role.label());
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => match ctx.auth.register(&name, &email, &password, &confirm_password).await? {
            RegisterOutcome::LoggedIn => println!("Cuenta creada y sesión iniciada."),
            RegisterOutcome::AutoLoginFailed { login_error } => {
                println!("{}", MSG_AUTO_LOGIN_FAILED);
                tracing::warn!(error = %login_error, "auto-login failed");
            }
        },
        Command::Logout => {
            ctx.auth.logout()?;
            println!("Sesión cerrada.");
        }
        Command::Profile => {
            println!("{}", LOADING);
            match ctx.profile().await {
                Ok(profile) => {
                    println!("{}", profile.name.to_uppercase());
                    println!("{}", profile.email);
                    println!("{}", profile.role.label());
                }
                Err(e) => println!("{}", user_load_error(&e.to_string())),
            }
        }
        Command::Offers => {
            println!("{}", LOADING);
            let screen = HomeScreen::new(ctx.api.clone(), ctx.cache.clone());
            match screen.load().await {
                Ok(offers) => render_offers(&offers),
                Err(e) => println!("{}", offers_load_error(&e.to_string())),
            }
        }
        Command::CreateOffer {
            title,
            description,
            company,
            location,
            salary,
            internship,
        } => {
            ctx.profile().await?;
            let screen = HomeScreen::new(ctx.api.clone(), ctx.cache.clone());
            let offer = screen
                .create_offer(OfferForm {
                    title,
                    description,
                    company,
                    location,
                    salary,
                    is_internship: internship,
                })
                .await?;
            println!("Oferta creada: {} ({})", offer.title, offer.id);
        }
        Command::Offer { id } => {
            println!("{}", LOADING);
            ctx.profile().await?;
            let screen = OfferInfoScreen::new(ctx.api.clone(), ctx.cache.clone(), &id);
            match screen.load().await {
                Ok(offer) => {
                    render_offer(&offer);
                    match screen.affordance().await? {
                        ApplyAffordance::Apply => println!("[Puedes postular con: apply {}]", id),
                        ApplyAffordance::View { message, status } => {
                            println!("Ya postulaste ({}). Tu mensaje:", status);
                            println!("  {}", message);
                        }
                        ApplyAffordance::Hidden => {}
                    }
                }
                Err(e) if e.kind() == linkedicci::error::ErrorKind::NotFound => {
                    println!("{}", MSG_OFFER_NOT_FOUND)
                }
                Err(e) => println!("{}", offer_load_error(&e.to_string())),
            }
        }
        Command::Apply { offer_id, message } => {
            ctx.profile().await?;
            let screen = OfferInfoScreen::new(ctx.api.clone(), ctx.cache.clone(), &offer_id);
            screen.apply(&message).await?;
            println!("Postulación enviada.");
        }
        Command::Applications => {
            println!("{}", LOADING);
            let screen = ApplicationsScreen::new(ctx.api.clone(), ctx.cache.clone());
            match screen.load().await {
                Ok(rows) => {
                    if rows.is_empty() {
                        println!("No tienes postulaciones.");
                    }
                    for row in rows {
                        let title = row
                            .offer
                            .as_ref()
                            .map(|o| o.title.as_str())
                            .unwrap_or("(oferta no disponible)");
                        println!(
                            "- {} [{}] {}",
                            title, row.application.status, row.application.message
                        );
                    }
                }
                Err(e) => println!("{}", applications_load_error(&e.to_string())),
            }
        }
        Command::Applicants { offer_id } => {
            println!("{}", LOADING);
            let mut screen = ApplicantsScreen::new(ctx.api.clone(), ctx.cache.clone(), &offer_id);
            if let Err(e) = screen.load().await {
                println!("{}", applications_load_error(&e.to_string()));
                return Ok(());
            }
            render_applicants(&screen, &offer_id);
        }
        Command::Decide {
            offer_id,
            application_id,
            action,
            yes,
        } => {
            println!("{}", LOADING);
            let mut screen = ApplicantsScreen::new(ctx.api.clone(), ctx.cache.clone(), &offer_id);
            screen.load().await?;

            if !screen.request_decision(&application_id, action) {
                return Err(Error::Internal(
                    "la postulación no existe o ya fue decidida".to_string(),
                )
                .into());
            }
            if let Some(prompt) = screen.prompt() {
                println!("{}", prompt);
            }
            if action == DecisionAction::Accept {
                println!("{}", ACCEPT_WARNING);
            }
            if !yes && !confirm_from_stdin()? {
                screen.cancel();
                println!("Acción cancelada.");
                return Ok(());
            }

            println!("Procesando...");
            match screen.confirm().await {
                ConfirmOutcome::Accepted(report) => {
                    println!("Postulación {} aceptada.", report.accepted_id);
                    let rejected = report
                        .peer_rejections
                        .iter()
                        .filter(|c| c.error.is_none())
                        .count();
                    if rejected > 0 {
                        println!("{} postulaciones pendientes rechazadas.", rejected);
                    }
                    match &report.cross_offer {
                        CrossOfferCleanup::Attempted { rejections } => {
                            let failed: Vec<_> =
                                rejections.iter().filter(|c| c.error.is_some()).collect();
                            for change in failed {
                                println!(
                                    "Aviso: no se pudo rechazar la postulación {} en otra oferta.",
                                    change.application_id
                                );
                            }
                        }
                        CrossOfferCleanup::FetchFailed { message } => println!(
                            "Aviso: no se pudieron revisar las demás postulaciones del estudiante: {}",
                            message
                        ),
                        CrossOfferCleanup::Skipped { reason } => {
                            println!("Aviso: limpieza entre ofertas omitida: {}", reason)
                        }
                    }
                    if let Some(error) = screen.dialog().error() {
                        println!("{}", error);
                    }
                }
                ConfirmOutcome::Rejected { application_id } => {
                    println!("Postulación {} rechazada.", application_id);
                }
                ConfirmOutcome::Failed { message } => {
                    println!("{}", message);
                }
                ConfirmOutcome::Ignored => {}
            }
            render_applicants(&screen, &offer_id);
        }
        Command::Cv { command } => {
            let profile = ctx.profile().await?;
            let mut screen = CvScreen::new(ctx.api.clone(), ctx.cache.clone(), &profile.id);
            match command {
                CvCommand::Show => {
                    println!("{}", LOADING);
                    match screen.load().await {
                        Ok(Some(cv)) => render_cv(&cv),
                        Ok(None) => {
                            println!("{}", NO_CV_MESSAGE);
                            if screen.take_missing_redirect() {
                                tokio::time::sleep(NO_CV_REDIRECT_DELAY).await;
                                let home = HomeScreen::new(ctx.api.clone(), ctx.cache.clone());
                                render_offers(&home.load().await?);
                            }
                        }
                        Err(e) => println!("{}", cv_load_error(&e.to_string())),
                    }
                }
                CvCommand::Create {
                    name,
                    description,
                    career,
                    email,
                    phone,
                    add_projects,
                    add_skills,
                } => {
                    println!("{}", LOADING);
                    match screen.load().await {
                        Ok(Some(_)) => {
                            println!("Ya existe un CV para este usuario; usa cv edit.");
                            return Ok(());
                        }
                        Ok(None) => {}
                        Err(e) => {
                            println!("{}", cv_load_error(&e.to_string()));
                            return Ok(());
                        }
                    }
                    if !screen.begin_create() {
                        return Err(Error::Internal("no se pudo iniciar el CV".to_string()).into());
                    }
                    {
                        let draft = screen.draft_mut().expect("create mode has a draft");
                        draft.name = name.unwrap_or_else(|| profile.name.clone());
                        draft.email = email.unwrap_or_else(|| profile.email.clone());
                        draft.description = description;
                        draft.career = career;
                        draft.phone = phone;
                        for raw in add_projects {
                            let (pname, url, pdesc) = parse_project(&raw)?;
                            let project = draft.add_project();
                            project.name = pname;
                            project.url = url;
                            project.description = pdesc;
                        }
                        for raw in add_skills {
                            let (sname, rate) = parse_skill(&raw)?;
                            let skill = draft.add_skill();
                            skill.name = sname;
                            skill.rate = rate;
                        }
                    }
                    match screen.submit().await {
                        Ok(cv) => {
                            println!("CV creado.");
                            render_cv(&cv);
                        }
                        Err(e) => println!("Error al crear el CV: {}", e),
                    }
                }
                CvCommand::Edit {
                    name,
                    description,
                    career,
                    email,
                    phone,
                    add_projects,
                    remove_projects,
                    add_skills,
                    remove_skills,
                } => {
                    println!("{}", LOADING);
                    match screen.load().await {
                        Ok(Some(_)) => {}
                        Ok(None) => {
                            println!("{}", NO_CV_MESSAGE);
                            return Ok(());
                        }
                        Err(e) => {
                            println!("{}", cv_load_error(&e.to_string()));
                            return Ok(());
                        }
                    }
                    if !screen.begin_edit() {
                        return Err(Error::Internal("no hay CV para editar".to_string()).into());
                    }
                    debug_assert_eq!(screen.view(), CvView::Editing);
                    {
                        let draft = screen.draft_mut().expect("edit mode has a draft");
                        // Removals first so the indices match what `cv show`
                        // displayed.
                        let mut removals = remove_projects;
                        removals.sort_unstable_by(|a, b| b.cmp(a));
                        for index in removals {
                            draft.remove_project(index);
                        }
                        let mut removals = remove_skills;
                        removals.sort_unstable_by(|a, b| b.cmp(a));
                        for index in removals {
                            draft.remove_skill(index);
                        }
                        for raw in add_projects {
                            let (pname, url, pdesc) = parse_project(&raw)?;
                            let project = draft.add_project();
                            project.name = pname;
                            project.url = url;
                            project.description = pdesc;
                        }
                        for raw in add_skills {
                            let (sname, rate) = parse_skill(&raw)?;
                            let skill = draft.add_skill();
                            skill.name = sname;
                            skill.rate = rate;
                        }
                        if let Some(v) = name {
                            draft.name = v;
                        }
                        if let Some(v) = description {
                            draft.description = v;
                        }
                        if let Some(v) = career {
                            draft.career = v;
                        }
                        if let Some(v) = email {
                            draft.email = v;
                        }
                        if let Some(v) = phone {
                            draft.phone = v;
                        }
                    }
                    match screen.submit().await {
                        Ok(cv) => {
                            println!("CV actualizado.");
                            render_cv(&cv);
                        }
                        Err(e) => println!("{}: {}", UPDATE_FAILED, e),
                    }
                }
            }
        }
    }

    Ok(())
}

fn confirm_from_stdin() -> io::Result<bool> {
    print!("Confirmar [s/n]: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "s" | "si" | "sí" | "y"))
}

fn parse_project(raw: &str) -> anyhow::Result<(String, String, String)> {
    let mut parts = raw.splitn(3, '|');
    let name = parts.next().unwrap_or_default().to_string();
    let url = parts.next().unwrap_or_default().to_string();
    let description = parts.next().unwrap_or_default().to_string();
    if name.is_empty() {
        anyhow::bail!("proyecto sin nombre: {}", raw);
    }
    Ok((name, url, description))
}

fn parse_skill(raw: &str) -> anyhow::Result<(String, u8)> {
    let mut parts = raw.splitn(2, '|');
    let name = parts.next().unwrap_or_default().to_string();
    if name.is_empty() {
        anyhow::bail!("habilidad sin nombre: {}", raw);
    }
    let rate: u8 = parts.next().unwrap_or("1").trim().parse()?;
    if !(1..=5).contains(&rate) {
        anyhow::bail!("el puntaje debe estar entre 1 y 5: {}", raw);
    }
    Ok((name, rate))
}

fn render_offers(offers: &[Offer]) {
    if offers.is_empty() {
        println!("No hay ofertas publicadas.");
    }
    for offer in offers {
        println!(
            "- [{}] {} | {} - {} | {} | ${}",
            offer.id,
            offer.title,
            offer.company,
            offer.location,
            offer.kind_label(),
            offer.salary
        );
    }
}

fn render_offer(offer: &Offer) {
    println!("{}", offer.title);
    println!("{} - {}", offer.company, offer.location);
    println!("{} | ${}", offer.kind_label(), offer.salary);
    println!();
    println!("{}", offer.description);
}

fn render_applicants(screen: &ApplicantsScreen, offer_id: &str) {
    let applicants = screen.applicants();
    if applicants.is_empty() {
        println!("No hay postulantes para esta oferta (offerId: {}).", offer_id);
        return;
    }
    for applicant in applicants {
        println!(
            "- [{}] {} | {} | Mensaje: {} | Fecha de postulación: {}",
            applicant.id,
            screen.student_label(&applicant.student_id),
            applicant.status,
            applicant.message,
            applicant.created_at.format("%d-%m-%Y %H:%M")
        );
        if applicant.status == ApplicationStatus::Pending {
            println!(
                "    (decidir con: decide {} {} accept|reject)",
                applicant.offer_id, applicant.id
            );
        }
    }
}

fn render_cv(cv: &linkedicci::models::cv::Cv) {
    println!("{}", cv.name);
    println!("{} | {} | {}", cv.career, cv.email, cv.phone);
    println!();
    println!("{}", cv.description);
    if !cv.projects.is_empty() {
        println!();
        println!("Proyectos:");
        for (i, project) in cv.projects.iter().enumerate() {
            println!("  {}. {} ({}) - {}", i, project.name, project.url, project.description);
        }
    }
    if !cv.skills.is_empty() {
        println!();
        println!("Habilidades:");
        for (i, skill) in cv.skills.iter().enumerate() {
            println!("  {}. {} [{}/5]", i, skill.name, skill.rate);
        }
    }
}
