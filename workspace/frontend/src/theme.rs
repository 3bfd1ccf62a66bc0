use stylist::css;
use stylist::yew::Global;
use yew::prelude::*;

/// Colors of the dark dashboard theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub paper: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub grid: &'static str,
    pub forecast_band: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub palette: Palette,
    pub font_family: &'static str,
}

pub const THEME: Theme = Theme {
    palette: Palette {
        background: "#1c1c1e",
        paper: "#2c2c2e",
        primary: "#00BFA6",
        secondary: "#29B6F6",
        text_primary: "#FFFFFF",
        text_secondary: "#B0BEC5",
        grid: "#3a3a3c",
        forecast_band: "#82ca9d",
    },
    font_family: "Roboto, sans-serif",
};

/// Baseline document styling derived from [`THEME`], mounted once by the root.
#[function_component(GlobalStyle)]
pub fn global_style() -> Html {
    let palette = THEME.palette;

    html! {
        <Global css={css!(
            r#"
                *, *::before, *::after {
                    box-sizing: border-box;
                }

                html, body {
                    margin: 0;
                    min-height: 100vh;
                    background-color: ${background};
                    color: ${text_primary};
                    font-family: ${font};
                    -webkit-font-smoothing: antialiased;
                }

                .panel {
                    background-color: ${paper};
                    border-radius: 8px;
                    padding: 1rem;
                    height: 100%;
                }

                .panel-title {
                    margin: 0 0 0.75rem 0;
                    font-size: 1.5rem;
                    font-weight: 400;
                }

                .text-muted {
                    color: ${text_secondary};
                }

                .accent {
                    color: ${primary};
                }
            "#,
            background = palette.background,
            text_primary = palette.text_primary,
            font = THEME.font_family,
            paper = palette.paper,
            text_secondary = palette.text_secondary,
            primary = palette.primary,
        )} />
    }
}
