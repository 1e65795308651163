use crate::{
    error::{AppError, AppResult},
    models::MediaTypeFilter,
    parser::Template,
};

/// Number of recommendations the prompt asks for
pub const RECOMMENDATION_COUNT: usize = 5;

/// Builds the recommendation prompt for the shows the user typed
///
/// Comma-separated input is enumerated (`1. A, 2. B`). The closing block asks
/// for one show per line in the shape `template` parses.
pub fn build_prompt(shows: &str, filter: MediaTypeFilter, template: Template) -> AppResult<String> {
    let entries: Vec<&str> = shows
        .split(',')
        .map(str::trim)
        .filter(|show| !show.is_empty())
        .collect();

    if entries.is_empty() {
        return Err(AppError::InvalidInput(
            "At least one show is required".to_string(),
        ));
    }

    let liked = if entries.len() > 1 {
        entries
            .iter()
            .enumerate()
            .map(|(index, show)| format!("{}. {}", index + 1, show))
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        entries[0].to_string()
    };

    let (kinds, only) = match filter {
        MediaTypeFilter::Tv => ("TV shows only", "tv"),
        MediaTypeFilter::Movie => ("movies only", "movie"),
        MediaTypeFilter::All => ("TV shows and movies", "tv or movie"),
    };

    Ok(format!(
        "Recommend me {count} popular {kinds} of the same genre or mood as {liked} that I might like.\n\
         Make sure to recommend only {only} type shows.\n\
         {fields}\n\
         \"\"\"\n\
         {format}\n\
         \"\"\"",
        count = RECOMMENDATION_COUNT,
        kinds = kinds,
        liked = liked,
        only = only,
        fields = field_instructions(template),
        format = line_format(template),
    ))
}

fn field_instructions(template: Template) -> &'static str {
    match template {
        Template::Dash2 => {
            "Make sure to include the name and type of media (tv or movie) for each show."
        }
        Template::Dash3 => {
            "Make sure to include the name, short description (between 1-2 sentences), and type of media (tv or movie) for each show."
        }
        Template::Colon2 => {
            "Make sure to include the type of media (tv or movie) and The Movie Database (TMDB) id for each show."
        }
    }
}

fn line_format(template: Template) -> &'static str {
    match template {
        Template::Dash2 => {
            "You can use the following template: 1. Name - Type of media\n\
             For example: 1. The Office - TV"
        }
        Template::Dash3 => {
            "You can use the following template: 1. Name - Description - Type of media\n\
             For example: 1. The Office - A mockumentary on a group of typical office workers, where the workday consists of ego clashes, inappropriate behavior, and tedium. - TV"
        }
        Template::Colon2 => {
            "You can use the following template: 1. Type of media: TMDB id\n\
             For example: 1. TV: 2316"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_recommendations;

    #[test]
    fn test_single_show_prompt() {
        let prompt = build_prompt("The Office", MediaTypeFilter::Tv, Template::Dash3).unwrap();

        assert!(prompt.starts_with(
            "Recommend me 5 popular TV shows only of the same genre or mood as The Office that I might like."
        ));
        assert!(prompt.contains("Make sure to recommend only tv type shows."));
        assert!(prompt.contains("1. Name - Description - Type of media"));
    }

    #[test]
    fn test_multiple_shows_are_enumerated() {
        let prompt = build_prompt(
            "The Office, Parks and Recreation,, ",
            MediaTypeFilter::All,
            Template::Dash3,
        )
        .unwrap();

        assert!(prompt.contains("as 1. The Office, 2. Parks and Recreation that I might like"));
        assert!(prompt.contains("TV shows and movies"));
    }

    #[test]
    fn test_movie_filter_wording() {
        let prompt = build_prompt("Heat", MediaTypeFilter::Movie, Template::Dash2).unwrap();
        assert!(prompt.contains("movies only"));
        assert!(prompt.contains("1. Name - Type of media"));
    }

    #[test]
    fn test_colon_template_wording() {
        let prompt = build_prompt("Dark", MediaTypeFilter::Tv, Template::Colon2).unwrap();
        assert!(prompt.contains("1. Type of media: TMDB id"));
    }

    #[test]
    fn test_empty_input_rejected() {
        let result = build_prompt(" , ,", MediaTypeFilter::All, Template::Dash3);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_examples_parse_with_their_template() {
        let examples = [
            (Template::Dash2, "1. The Office - TV"),
            (Template::Colon2, "1. TV: 2316"),
        ];

        for (template, example) in examples {
            assert!(line_format(template).ends_with(example));
            let shows = parse_recommendations(example, template).unwrap();
            assert_eq!(shows[0].media_type.as_deref(), Some("tv"));
        }
    }
}
