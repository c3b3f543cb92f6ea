use serde_json::json;

use crate::settings::model::NewSiteSetting;

fn setting(
    key: &str,
    category: &str,
    value: serde_json::Value,
    is_public: bool,
    description: &str,
) -> NewSiteSetting {
    NewSiteSetting {
        key: key.to_string(),
        category: category.to_string(),
        value,
        is_public,
        description: Some(description.to_string()),
    }
}

/// Site configuration the marketing frontend expects to find on first boot.
pub fn default_settings() -> Vec<NewSiteSetting> {
    let client_logos: Vec<serde_json::Value> = (1..=6)
        .map(|i| {
            json!({
                "name": format!("Client {i}"),
                "logo": format!("/assets/clients/client{i}.svg"),
            })
        })
        .collect();

    vec![
        setting(
            "site_info",
            "general",
            json!({
                "siteName": "Never Before Marketing",
                "tagline": "Elevate Your Brand with Stunning Visuals",
                "description": "Professional motion graphics and animation services",
                "logo": "/assets/logo.svg",
                "favicon": "/assets/favicon.ico",
            }),
            true,
            "Basic site information displayed in header and meta tags",
        ),
        setting(
            "contact_info",
            "general",
            json!({
                "email": "hello@neverbeforemarketing.com",
                "phone": "+1 (555) 123-4567",
                "address": "123 Creative Street, Design City, DC 12345",
                "socialLinks": {
                    "instagram": "https://instagram.com/neverbeforemarketing",
                    "linkedin": "https://linkedin.com/company/neverbeforemarketing",
                    "youtube": "https://youtube.com/@neverbeforemarketing",
                    "twitter": "https://twitter.com/nbmarketing",
                },
            }),
            true,
            "Contact information and social media links",
        ),
        setting(
            "hero_section",
            "sections",
            json!({
                "title": "Elevate Your Brand with Stunning Visuals",
                "subtitle": "Professional motion graphics and animation services that bring your vision to life",
                "ctaText": "View Our Work",
                "ctaLink": "/projects",
                "backgroundVideo": "/assets/hero-bg.mp4",
            }),
            true,
            "Hero section content on homepage",
        ),
        setting(
            "motion_graphics_section",
            "sections",
            json!({
                "title": "Motion Graphics",
                "description": "Dynamic animations and visual effects that captivate your audience",
                "showcaseCount": 6,
                "tags": ["2D Animation", "Logo Animation", "Explainer Videos", "Social Media Content"],
            }),
            true,
            "Motion graphics section configuration",
        ),
        setting(
            "animations_section",
            "sections",
            json!({
                "title": "3D Animations",
                "description": "Cutting-edge 3D animations and product visualizations",
                "showcaseCount": 6,
                "tags": ["3D Modeling", "Product Visualization", "Character Animation", "Architectural Visualization"],
            }),
            true,
            "3D animations section configuration",
        ),
        setting(
            "clients_section",
            "sections",
            json!({
                "title": "Trusted by Leading Brands",
                "logos": client_logos,
            }),
            true,
            "Client logos section",
        ),
        setting(
            "softwares_section",
            "sections",
            json!({
                "title": "Industry-Leading Tools",
                "items": [
                    { "name": "Adobe After Effects", "icon": "/assets/software/after-effects.svg" },
                    { "name": "Cinema 4D", "icon": "/assets/software/cinema4d.svg" },
                    { "name": "Blender", "icon": "/assets/software/blender.svg" },
                    { "name": "Adobe Premiere Pro", "icon": "/assets/software/premiere.svg" },
                    { "name": "DaVinci Resolve", "icon": "/assets/software/davinci.svg" },
                    { "name": "Houdini", "icon": "/assets/software/houdini.svg" },
                ],
            }),
            true,
            "Software/tools used section",
        ),
        setting(
            "strategy_section",
            "sections",
            json!({
                "title": "Our Strategy",
                "content": {
                    "introduction": "We follow a proven process to deliver exceptional results",
                    "steps": [
                        {
                            "title": "Discovery",
                            "description": "Understanding your brand, goals, and target audience",
                            "icon": "\u{1F50D}",
                        },
                        {
                            "title": "Concept",
                            "description": "Developing creative concepts that align with your vision",
                            "icon": "\u{1F4A1}",
                        },
                        {
                            "title": "Production",
                            "description": "Bringing ideas to life with cutting-edge techniques",
                            "icon": "\u{1F3AC}",
                        },
                        {
                            "title": "Delivery",
                            "description": "Final polish and delivery in your preferred format",
                            "icon": "\u{2728}",
                        },
                    ],
                },
            }),
            true,
            "Strategy/process section content",
        ),
        setting(
            "mission_section",
            "sections",
            json!({
                "title": "Our Mission",
                "content": "At Never Before Marketing, we're passionate about creating visual experiences that leave lasting impressions. Our team of talented artists and animators combines creativity with technical expertise to deliver motion graphics and animations that elevate your brand and engage your audience.",
                "image": "/assets/mission-image.jpg",
            }),
            true,
            "Mission/about section content",
        ),
        setting(
            "showcase_config",
            "showcase",
            json!({
                "homepageCardCount": 8,
                "motionGraphicsCount": 12,
                "animationsCount": 12,
                "autoplay": true,
                "showTags": true,
            }),
            true,
            "Showcase display configuration (card counts, features)",
        ),
        setting(
            "email_settings",
            "email",
            json!({
                "smtp_host": "smtp.gmail.com",
                "smtp_port": 587,
                "from_email": "hello@neverbeforemarketing.com",
                "from_name": "Never Before Marketing",
            }),
            false,
            "Email configuration (private)",
        ),
        setting(
            "feature_flags",
            "features",
            json!({
                "enableContactForm": true,
                "enableNewsletter": true,
                "enableBlog": false,
                "enableTestimonials": false,
                "maintenanceMode": false,
            }),
            true,
            "Feature toggle flags",
        ),
    ]
}
