//! Project records and the catalog they are loaded from.
//!
//! The catalog is read once at startup and never mutated afterwards.  It can
//! come from the built-in list or from a TOML file of `[[project]]` tables,
//! optionally followed by the about page and the technology showcase:
//!
//! ```toml
//! [[project]]
//! id = 1
//! title = "PharmaChain"
//! description = "..."
//! tech_stack = ["Solidity", "IPFS"]
//! link = "https://github.com/..."
//! thumbnail = "covers/pharmachain.png"   # optional
//!
//! [about]
//! heading = "About Ayoub Harati"
//! paragraphs = ["...", "..."]
//!
//! [[technology]]
//! category = "Languages"
//! items = ["Java", "Python"]
//!
//! [[certification]]
//! name = "AWS Academy Cloud Foundations"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single portfolio entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<PathBuf>,
}

impl Project {
    /// The first `limit` tags plus how many were left out.
    pub fn visible_tags(&self, limit: usize) -> (&[String], usize) {
        let shown = self.tech_stack.len().min(limit);
        (&self.tech_stack[..shown], self.tech_stack.len() - shown)
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("catalog contains no projects")]
    Empty,

    #[error("project id {0} appears more than once")]
    DuplicateId(u32),

    #[error("project {0} has an empty title")]
    MissingTitle(u32),
}

/// Text of the about page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct About {
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

/// One group of the technology showcase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
}

/// Everything in the catalog besides the projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub about: About,
    pub technologies: Vec<TechCategory>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "project")]
    projects: Vec<Project>,
    #[serde(default)]
    about: About,
    #[serde(default, rename = "technology")]
    technologies: Vec<TechCategory>,
    #[serde(default, rename = "certification")]
    certifications: Vec<Certification>,
}

/// Ordered, validated list of projects plus the profile pages.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    profile: Profile,
}

impl Catalog {
    /// Validate and wrap an ordered list.
    pub fn new(projects: Vec<Project>, profile: Profile) -> Result<Self, CatalogError> {
        if projects.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for p in &projects {
            if !seen.insert(p.id) {
                return Err(CatalogError::DuplicateId(p.id));
            }
            if p.title.trim().is_empty() {
                return Err(CatalogError::MissingTitle(p.id));
            }
        }
        Ok(Self { projects, profile })
    }

    pub fn from_toml_str(s: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(s)?;
        let profile = Profile {
            about: file.about,
            technologies: file.technologies,
            certifications: file.certifications,
        };
        Self::new(file.projects, profile)
    }

    /// Load a catalog file.  Relative thumbnail paths are resolved against
    /// the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_toml_str(&contents)?;
        if let Some(base) = path.parent() {
            catalog.resolve_thumbnails(base);
        }
        tracing::debug!(
            path = %path.display(),
            projects = catalog.projects().len(),
            technologies = catalog.profile.technologies.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    fn resolve_thumbnails(&mut self, base: &Path) {
        for p in &mut self.projects {
            if let Some(thumb) = p.thumbnail.as_mut() {
                if thumb.is_relative() {
                    *thumb = base.join(&*thumb);
                }
            }
        }
    }

    /// The six projects shipped with the binary, with the author's about
    /// page and technology showcase.
    ///
    /// Cover images are referenced as `assets/*_cover.png` relative to the
    /// working directory and are not bundled, so outside a checkout that
    /// provides them every card shows the placeholder.  Pass a catalog file
    /// to use real covers.
    pub fn builtin() -> Self {
        let entry = |id: u32,
                     title: &str,
                     description: &str,
                     tech: &[&str],
                     link: &str,
                     thumbnail: Option<&str>| Project {
            id,
            title: title.to_string(),
            description: description.to_string(),
            tech_stack: tech.iter().map(|t| t.to_string()).collect(),
            link: link.to_string(),
            thumbnail: thumbnail.map(PathBuf::from),
        };

        Self {
            projects: vec![
                entry(
                    1,
                    "PharmaChain",
                    "A full-stack blockchain and IoT platform ensuring secure traceability of \
                     pharmaceutical products. It integrates smart contracts, IPFS, and AI \
                     verification to monitor and validate medicine quality throughout the \
                     supply chain.",
                    &["React.js", "React Native", "Solidity", "Ethereum", "IPFS", "Node-RED", "Python", "AI/ML"],
                    "https://github.com/ayoubharati/medProject",
                    Some("assets/pharmachain_cover.png"),
                ),
                entry(
                    2,
                    "MarkerGo",
                    "A modern cross-platform mobile application built with Expo & React Native \
                     for discovering and managing local market listings. Includes geolocation, \
                     image uploads, native device support, and state management with Zustand.",
                    &["React Native", "Expo", "TypeScript", "NativeWind", "Zustand", "Expo Router"],
                    "https://github.com/abdellah-elgharbi/MarkerGo",
                    None,
                ),
                entry(
                    3,
                    "Paraphrase FR",
                    "A research-driven NLP project focused on French paraphrase detection using \
                     the PAWS-X dataset. It benchmarks multiple approaches, from TF-IDF baselines \
                     to fine-tuned CamemBERT and hybrid models.",
                    &["Python", "Transformers", "CamemBERT", "Streamlit", "PyTorch", "NLTK"],
                    "https://github.com/ayoubharati/paraphrase_fr",
                    Some("assets/paraphrase_fr_cover.png"),
                ),
                entry(
                    4,
                    "SqlRag",
                    "A full-stack AI-powered data warehouse chatbot that transforms natural \
                     language queries into SQL queries through a seven-step workflow.",
                    &["React.js", "Flask", "Python", "Google Gemini AI", "FAISS", "PostgreSQL", "Chart.js"],
                    "https://github.com/ayoubharati/dataware_chatbot",
                    Some("assets/sqlrag_cover.png"),
                ),
                entry(
                    5,
                    "ExamSessionManager",
                    "A full-stack web application for managing and automating exam supervision \
                     within universities. It streamlines scheduling, teacher assignments, and \
                     session monitoring with a secure interface and real-time updates.",
                    &["React.js", "Spring Boot", "Spring Security", "Hibernate", "MySQL", "Tailwind CSS"],
                    "https://github.com/YounesAO/ExamSessionManger",
                    Some("assets/examsessionmanager_cover.png"),
                ),
                entry(
                    6,
                    "Smart Rehab",
                    "A smart rehabilitation platform that leverages real-time pose detection and \
                     motion analysis to assist patients and therapists in monitoring and \
                     improving physical recovery.",
                    &["Vite.js", "Spring Boot", "MySQL", "Java (Android)", "Docker", "Pose Detection"],
                    "https://github.com/Ballouk12/SmartRehab",
                    Some("assets/smartrehab_cover.png"),
                ),
            ],
            profile: builtin_profile(),
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn into_parts(self) -> (Vec<Project>, Profile) {
        (self.projects, self.profile)
    }
}

fn builtin_profile() -> Profile {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let category = |name: &str, items: &[&str]| TechCategory {
        category: name.to_string(),
        items: strings(items),
    };

    Profile {
        about: About {
            heading: "About Ayoub Harati".to_string(),
            paragraphs: strings(&[
                "At Ayoub Harati, I'm dedicated to pushing boundaries and creating impactful \
                 solutions through cutting-edge technology. With a focus on innovation in \
                 Artificial Intelligence, Big Data, and Cloud Computing, I work to empower \
                 businesses with transformative digital tools and data-driven insights.",
                "I'm a 5th-year engineering student at ENSA El Jadida, specializing in building \
                 scalable architectures and intelligent systems. My technical foundation \
                 includes Java, Python, and JavaScript, enabling me to engineer sophisticated \
                 solutions ranging from Generative AI models (LLMs, RAG) and Machine Learning \
                 to complex Data Warehousing and ETL pipelines.",
            ]),
        },
        technologies: vec![
            category(
                "Languages",
                &["Java", "Python", "JavaScript", "TypeScript", "C", "Scala", "Solidity", "HTML5", "CSS3"],
            ),
            category(
                "Frameworks & Libraries",
                &["Spring Boot", "Flask", "React.js", "React Native", "TensorFlow", "PyTorch", "pandas"],
            ),
            category("APIs & Tools", &["Postman"]),
            category(
                "Databases",
                &["MySQL", "PostgreSQL", "Microsoft SQL Server", "MongoDB", "Redis"],
            ),
            category("Cloud & Virtualization", &["Docker", "Kubernetes", "Terraform"]),
            category("CI/CD", &["Jenkins", "GitHub Actions", "Git"]),
            category("Data Engineering", &["Apache Spark", "Hadoop", "Kafka"]),
            category("Tools & Environment", &["Linux", "VS Code", "GitHub"]),
        ],
        certifications: [
            "AWS Academy Cloud Foundations",
            "AWS Academy Cloud Architecting",
            "Oracle Cloud Infrastructure 2025 Certified DevOps Professional",
        ]
        .iter()
        .map(|name| Certification {
            name: name.to_string(),
        })
        .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[project]]
        id = 7
        title = "Alpha"
        description = "first"
        tech_stack = ["Rust", "Tokio"]
        link = "https://example.com/alpha"
        thumbnail = "covers/alpha.png"

        [[project]]
        id = 8
        title = "Beta"
        description = "second"
        link = "https://example.com/beta"
    "#;

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.projects().len(), 6);
        let (projects, profile) = builtin.into_parts();
        assert!(Catalog::new(projects, profile).is_ok());
    }

    #[test]
    fn builtin_keeps_one_project_without_thumbnail() {
        let builtin = Catalog::builtin();
        let missing: Vec<_> = builtin
            .projects()
            .iter()
            .filter(|p| p.thumbnail.is_none())
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(missing, ["MarkerGo"]);
    }

    #[test]
    fn parses_toml_in_order() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        let titles: Vec<_> = catalog.projects().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Beta"]);
        assert!(catalog.projects()[1].tech_stack.is_empty());
        assert_eq!(catalog.projects()[1].thumbnail, None);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(matches!(Catalog::from_toml_str(""), Err(CatalogError::Empty)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dup = r#"
            [[project]]
            id = 1
            title = "A"
            description = ""
            link = ""

            [[project]]
            id = 1
            title = "B"
            description = ""
            link = ""
        "#;
        assert!(matches!(
            Catalog::from_toml_str(dup),
            Err(CatalogError::DuplicateId(1))
        ));
    }

    #[test]
    fn blank_title_is_rejected() {
        let blank = r#"
            [[project]]
            id = 3
            title = "   "
            description = ""
            link = ""
        "#;
        assert!(matches!(
            Catalog::from_toml_str(blank),
            Err(CatalogError::MissingTitle(3))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            Catalog::from_toml_str("[[project]]\nid = \"one\""),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn load_resolves_relative_thumbnails() {
        let dir = std::env::temp_dir().join(format!("folio-catalog-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("projects.toml");
        std::fs::write(&path, SAMPLE).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(
            catalog.projects()[0].thumbnail.as_deref(),
            Some(dir.join("covers/alpha.png").as_path())
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Catalog::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn profile_sections_are_optional() {
        let (_, profile) = Catalog::from_toml_str(SAMPLE).unwrap().into_parts();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn parses_profile_sections() {
        let toml = format!(
            "{SAMPLE}{}",
            r#"
            [about]
            heading = "About Me"
            paragraphs = ["One.", "Two."]

            [[technology]]
            category = "Languages"
            items = ["Rust", "C"]

            [[technology]]
            category = "Tools"

            [[certification]]
            name = "Some Cert"
            "#
        );
        let (projects, profile) = Catalog::from_toml_str(&toml).unwrap().into_parts();
        assert_eq!(projects.len(), 2);
        assert_eq!(profile.about.heading, "About Me");
        assert_eq!(profile.about.paragraphs, ["One.", "Two."]);
        assert_eq!(profile.technologies.len(), 2);
        assert_eq!(profile.technologies[0].items, ["Rust", "C"]);
        assert!(profile.technologies[1].items.is_empty());
        assert_eq!(profile.certifications[0].name, "Some Cert");
    }

    #[test]
    fn builtin_profile_lists_showcase() {
        let (_, profile) = Catalog::builtin().into_parts();
        assert_eq!(profile.about.heading, "About Ayoub Harati");
        assert_eq!(profile.about.paragraphs.len(), 2);
        let total: usize = profile.technologies.iter().map(|c| c.items.len()).sum();
        assert_eq!(total, 34);
        assert_eq!(profile.certifications.len(), 3);
    }

    #[test]
    fn visible_tags_reports_overflow() {
        let builtin = Catalog::builtin();
        let pharma = &builtin.projects()[0];
        let (shown, more) = pharma.visible_tags(4);
        assert_eq!(shown, ["React.js", "React Native", "Solidity", "Ethereum"]);
        assert_eq!(more, 4);

        let (shown, more) = pharma.visible_tags(20);
        assert_eq!(shown.len(), 8);
        assert_eq!(more, 0);
    }
}
