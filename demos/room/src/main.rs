use voxel_diorama::{
    EngineConfig,
    content::{ContentCatalog, ContentSection, Slide},
    data_structures::voxel::CHARACTER_ID,
    generator::{self, BED_ID, DESK_ID, EASEL_ID},
};

fn catalog() -> ContentCatalog {
    ContentCatalog::new()
        .with(
            ContentSection::new(DESK_ID, "Notes")
                .slide(Slide::new("Desk").paragraph("A notepad full of half-finished ideas.")),
        )
        .with(
            ContentSection::new(EASEL_ID, "Canvas")
                .slide(Slide::new("Work in progress").image_placeholder("An unfinished landscape")),
        )
        .with(
            ContentSection::new(BED_ID, "Rest")
                .slide(Slide::new("Bed").paragraph("Even voxels need sleep.")),
        )
        .with(
            ContentSection::new(CHARACTER_ID, "Hello")
                .slide(Slide::new("The resident").paragraph("Walk around with WASD or the arrow keys.")),
        )
}

fn main() -> anyhow::Result<()> {
    let catalog = catalog();
    voxel_diorama::run_with(
        EngineConfig::default(),
        Box::new(generator::generate_room),
        Box::new(move |id: &str| match catalog.get(id) {
            Some(section) => {
                log::info!("{} ({} slides)", section.title, section.slides.len());
                for slide in &section.slides {
                    log::info!("  {}", slide.title);
                }
            }
            None => log::info!("clicked {} which has no content", id),
        }),
    )
}
