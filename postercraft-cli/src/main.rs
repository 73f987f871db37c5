use std::{
    io::{BufRead as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use postercraft::{
    Canvas, DesignStore, Editor, ElementId, Field, FileStorage, FsTemplateSource, LoadOutcome,
    Point, PointerId, SvgRasterizer, TemplateCatalog, config,
};

#[derive(Parser, Debug)]
#[command(name = "postercraft", version)]
struct Cli {
    /// Directory holding the saved design slot.
    #[arg(long, global = true, default_value = ".postercraft")]
    store: PathBuf,

    /// Template catalog JSON. Relative sample images resolve against its directory.
    #[arg(long, global = true, default_value = config::TEMPLATES_FILE)]
    catalog: PathBuf,

    /// Poster surface size, `WxH`.
    #[arg(long, global = true, default_value = "800x1000")]
    size: Canvas,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available templates.
    Templates,
    /// Change the saved design.
    Edit(EditArgs),
    /// Print the saved design as JSON.
    Show,
    /// Reset the saved design to defaults.
    Clear(ClearArgs),
    /// Render the saved design as a PNG.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Apply a template by id before the field flags.
    #[arg(long)]
    template: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    #[arg(long)]
    body: Option<String>,

    #[arg(long)]
    date: Option<String>,

    /// Accent color, `#rrggbb`.
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    title_size: Option<String>,

    #[arg(long)]
    font: Option<String>,

    /// Image file to use as the background.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Reposition an element: `title=40,120`. Repeatable.
    #[arg(long = "move", value_parser = parse_move)]
    moves: Vec<(ElementId, Point)>,
}

#[derive(Parser, Debug)]
struct ClearArgs {
    /// Do not ask for confirmation.
    #[arg(long, short = 'y', default_value_t = false)]
    yes: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Output PNG path.
    #[arg(long, default_value = config::EXPORT_FILE_NAME)]
    out: PathBuf,

    /// Pixel scale relative to the poster size.
    #[arg(long, default_value_t = config::DEFAULT_EXPORT_SCALE)]
    scale: f32,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match &cli.cmd {
        Command::Templates => cmd_templates(&cli),
        Command::Edit(args) => cmd_edit(&cli, args),
        Command::Show => cmd_show(&cli),
        Command::Clear(args) => cmd_clear(&cli, args),
        Command::Export(args) => cmd_export(&cli, args),
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn catalog(cli: &Cli) -> TemplateCatalog {
    postercraft::load_catalog(&FsTemplateSource::new(&cli.catalog))
}

fn resources_dir(cli: &Cli) -> PathBuf {
    cli.catalog
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

/// Open an editor over the saved slot. A missing slot starts from defaults.
fn open_editor(cli: &Cli) -> anyhow::Result<Editor<FileStorage>> {
    let mut editor = Editor::new(catalog(cli), FileStorage::new(&cli.store), cli.size);
    editor
        .load()
        .with_context(|| format!("load design from '{}'", cli.store.display()))?;
    Ok(editor)
}

fn cmd_templates(cli: &Cli) -> anyhow::Result<()> {
    for t in catalog(cli).iter() {
        println!("{:<12} {:<20} {}", t.id, t.name, t.color);
    }
    Ok(())
}

fn cmd_edit(cli: &Cli, args: &EditArgs) -> anyhow::Result<()> {
    let mut editor = open_editor(cli)?;

    if let Some(id) = &args.template
        && !editor.select_template(id)
    {
        anyhow::bail!("unknown template '{id}'");
    }

    let fields = [
        (Field::Title, &args.title),
        (Field::Subtitle, &args.subtitle),
        (Field::Body, &args.body),
        (Field::Date, &args.date),
        (Field::Color, &args.color),
        (Field::TitleSize, &args.title_size),
        (Field::Font, &args.font),
    ];
    for (field, value) in fields {
        if let Some(v) = value
            && !editor.input(field, v)
        {
            eprintln!("--{}: '{v}' left the design unchanged", field.name());
        }
    }

    if let Some(path) = &args.background {
        let bytes =
            std::fs::read(path).with_context(|| format!("read background '{}'", path.display()))?;
        if !editor.upload_background(&bytes) {
            anyhow::bail!("'{}': {}", path.display(), editor.status());
        }
    }

    // A scripted move is a one-step drag from the element's current position.
    for (i, (id, to)) in args.moves.iter().enumerate() {
        let pointer = PointerId(i as u32);
        let from = editor
            .surface()
            .element(*id)
            .map(|e| e.position)
            .with_context(|| format!("no element '{id}'"))?;
        editor.pointer_down_on(pointer, *id, from);
        editor.pointer_move(pointer, *to);
        editor.pointer_up(pointer);
    }

    if !editor.save() {
        anyhow::bail!("{}", editor.status());
    }
    tracing::debug!(store = %cli.store.display(), "design saved");
    eprintln!("saved {}", cli.store.display());
    Ok(())
}

fn cmd_show(cli: &Cli) -> anyhow::Result<()> {
    let mut store = DesignStore::new(FileStorage::new(&cli.store));
    match store
        .load()
        .with_context(|| format!("load design from '{}'", cli.store.display()))?
    {
        LoadOutcome::Loaded => {
            let json = serde_json::to_string_pretty(store.state()).context("serialize design")?;
            println!("{json}");
        }
        LoadOutcome::NotFound => println!("No saved design found."),
    }
    Ok(())
}

fn cmd_clear(cli: &Cli, args: &ClearArgs) -> anyhow::Result<()> {
    let mut store = DesignStore::new(FileStorage::new(&cli.store));
    let cleared = if args.yes {
        store.clear(&mut |_: &str| true)
    } else {
        store.clear(&mut prompt_stdin)
    };
    if !cleared {
        eprintln!("kept current design");
        return Ok(());
    }
    store
        .save()
        .with_context(|| format!("save cleared design to '{}'", cli.store.display()))?;
    eprintln!("cleared {}", cli.store.display());
    Ok(())
}

fn prompt_stdin(prompt: &str) -> bool {
    eprint!("{prompt} [y/N] ");
    let _ = std::io::stderr().flush();
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line).is_err() {
        return false;
    }
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn cmd_export(cli: &Cli, args: &ExportArgs) -> anyhow::Result<()> {
    let mut editor = open_editor(cli)?;
    let rasterizer = SvgRasterizer::new(Some(resources_dir(cli)));
    tracing::debug!(fonts = rasterizer.font_faces(), "rasterizer ready");
    let png = editor
        .export(&rasterizer, args.scale)
        .with_context(|| format!("{}", editor.status()))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn parse_move(s: &str) -> Result<(ElementId, Point), String> {
    let (id, xy) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <element>=<x>,<y>, got '{s}'"))?;
    let id: ElementId = id.trim().parse().map_err(|e| format!("{e}"))?;
    let (x, y) = xy
        .split_once(',')
        .ok_or_else(|| format!("expected <x>,<y>, got '{xy}'"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad x '{x}'"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad y '{y}'"))?;
    Ok((id, Point::new(x, y)))
}
