fn is_word_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == ',' || c == '.' || c == ';'
}

pub fn split_text_into_words(text: &str) -> Vec<&str> {
    text.split(is_word_separator)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Derives a URL path segment from a display name.
///
/// Lowercases, transliterates the Spanish characters that occur
/// in real listing titles and collapses everything else into
/// single hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true;
    for c in text.chars().flat_map(char::to_lowercase) {
        let mapped: &str = match c {
            'á' | 'à' | 'ä' => "a",
            'é' | 'è' | 'ë' => "e",
            'í' | 'ì' | 'ï' => "i",
            'ó' | 'ò' | 'ö' => "o",
            'ú' | 'ù' | 'ü' => "u",
            'ñ' => "n",
            c if c.is_ascii_alphanumeric() => {
                slug.push(c);
                last_was_hyphen = false;
                continue;
            }
            _ => {
                if !last_was_hyphen {
                    slug.push('-');
                    last_was_hyphen = true;
                }
                continue;
            }
        };
        slug.push_str(mapped);
        last_was_hyphen = false;
    }
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_split_text_into_words() {
        assert_eq!(
            vec!["A-a", "B", "#", "b", "C_c", "d", "-", "D"],
            split_text_into_words(" . A-a,B # b C_c;d - D , ")
        );
    }

    #[test]
    fn slugify_titles() {
        assert_eq!("panaderia-el-sol", slugify("Panadería El Sol"));
        assert_eq!("cafe-nunez", slugify("Café Núñez!"));
        assert_eq!("a-b-c", slugify("  a  b  c  "));
        assert_eq!("", slugify("¡¿!?"));
    }
}
