use std::io::{self, Write};

use catalog_core::{CatalogViewModel, CharacterSummary, FilterSet};

pub fn render(out: &mut impl Write, view: &CatalogViewModel) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Search: {} | {}",
        search_label(&view.search),
        filters_label(&view.filters)
    )?;

    if let Some(rejection) = &view.last_rejection {
        writeln!(out, "! {rejection}")?;
    }

    if view.is_loading {
        // Stale cards are hidden while the next page loads.
        writeln!(out, "Loading...")?;
    } else if let Some(error) = &view.error {
        writeln!(out, "Could not load characters ({error}). Type 'retry'.")?;
    } else {
        match view.entities.as_deref() {
            Some([]) => writeln!(out, "No characters found.")?,
            Some(entities) => {
                for character in entities {
                    writeln!(out, "{}", format_card(character))?;
                }
            }
            None => {}
        }
    }

    writeln!(out, "{}", pager_line(view))?;
    out.flush()
}

fn search_label(search: &str) -> String {
    if search.is_empty() {
        "(none)".to_string()
    } else {
        format!("{search:?}")
    }
}

fn filters_label(filters: &FilterSet) -> String {
    format!(
        "Status: {} | Gender: {}",
        filters.status.map_or("any", |status| status.as_str()),
        filters.gender.map_or("any", |gender| gender.as_str())
    )
}

fn format_card(character: &CharacterSummary) -> String {
    format!(
        "[#{id}] {name} ({status}, {species}) origin: {origin}, last seen: {location}",
        id = character.id,
        name = character.name,
        status = character.status,
        species = character.species,
        origin = character.origin,
        location = character.location,
    )
}

fn pager_line(view: &CatalogViewModel) -> String {
    if view.total_pages == 0 {
        return format!("Page {} (no pages)", view.current_page);
    }
    let links = view
        .page_links
        .iter()
        .map(|link| match link {
            Some(page) if *page == view.current_page.get() => format!("[{page}]"),
            Some(page) => page.to_string(),
            None => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    let total = view
        .total_count
        .map(|count| format!(" | {count} characters"))
        .unwrap_or_default();
    format!(
        "Page {} of {}{} | {}",
        view.current_page, view.total_pages, total, links
    )
}
