//! Level-to-display mapping shared by the page and the JSON API.

use serde::{Deserialize, Serialize};

use crate::model::{Estimate, StressLevel};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Interpretation {
    pub level: StressLevel,
    pub label: &'static str,
    pub severity: Severity,
    pub summary: &'static str,
    pub recommendations: Vec<Recommendation>,
}

/// An estimate together with everything the result card shows.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EstimateView {
    pub estimate: Estimate,
    pub score_display: String,
    pub confidence_display: String,
    pub interpretation: Interpretation,
}

pub fn severity(level: StressLevel) -> Severity {
    match level {
        StressLevel::Low => Severity::Success,
        StressLevel::Moderate => Severity::Warning,
        StressLevel::High => Severity::Danger,
    }
}

pub fn label(level: StressLevel, locale: Locale) -> &'static str {
    match (locale, level) {
        (Locale::En, _) => level.as_str(),
        (Locale::Id, StressLevel::Low) => "Rendah",
        (Locale::Id, StressLevel::Moderate) => "Sedang",
        (Locale::Id, StressLevel::High) => "Tinggi",
    }
}

pub fn summary(level: StressLevel, locale: Locale) -> &'static str {
    match (locale, level) {
        (Locale::En, StressLevel::Low) => {
            "Great! Your lifestyle tends to support good mental health. Keep up this pattern."
        }
        (Locale::En, StressLevel::Moderate) => {
            "You are in the moderate zone. Consider improving your time management and relaxation activities."
        }
        (Locale::En, StressLevel::High) => {
            "Your stress level is quite high. Seeking support and applying stress-management techniques is strongly recommended."
        }
        (Locale::Id, StressLevel::Low) => {
            "Bagus! Gaya hidup Anda cenderung mendukung kesehatan mental yang baik. Pertahankan pola ini."
        }
        (Locale::Id, StressLevel::Moderate) => {
            "Anda berada di zona moderat. Pertimbangkan untuk meningkatkan manajemen waktu dan aktivitas relaksasi."
        }
        (Locale::Id, StressLevel::High) => {
            "Tingkat stres Anda cukup tinggi. Sangat disarankan untuk mencari dukungan dan menerapkan teknik manajemen stres."
        }
    }
}

const LOW_EN: [Recommendation; 4] = [
    Recommendation {
        title: "Raise your motivation",
        detail: "Set more challenging academic targets with realistic deadlines to sharpen your study focus.",
    },
    Recommendation {
        title: "Structure your study",
        detail: "Keep a consistent study schedule and use time-blocking to stay productive.",
    },
    Recommendation {
        title: "Look for challenges",
        detail: "Join academic competitions, side projects or organisations for extra intellectual stimulation.",
    },
    Recommendation {
        title: "Accountability partner",
        detail: "Find a study buddy or mentor who helps you stay consistent and motivated.",
    },
];

const MODERATE_EN: [Recommendation; 4] = [
    Recommendation {
        title: "Keep the balance",
        detail: "Balance study, rest and social time. It is the key to your steady performance.",
    },
    Recommendation {
        title: "Healthy routine",
        detail: "Sleep 7-8 hours, exercise lightly three times a week and study at consistent times.",
    },
    Recommendation {
        title: "Monitor progress",
        detail: "Review your study methods and stress level regularly to make sure they stay optimal.",
    },
    Recommendation {
        title: "Hobbies and creativity",
        detail: "Make time for hobbies and creative work as a positive outlet for your mental balance.",
    },
];

const HIGH_EN: [Recommendation; 4] = [
    Recommendation {
        title: "Manage stress",
        detail: "Learn relaxation techniques such as deep breathing, meditation or mindfulness.",
    },
    Recommendation {
        title: "Prioritise rest",
        detail: "Do not trade sleep for study. 7-9 hours of quality sleep is essential for mental recovery.",
    },
    Recommendation {
        title: "Daily physical activity",
        detail: "Schedule at least 30 minutes of exercise every day to lower stress hormones.",
    },
    Recommendation {
        title: "Ask for help",
        detail: "Talk to a counsellor or psychologist when stress starts to disrupt daily life.",
    },
];

const LOW_ID: [Recommendation; 4] = [
    Recommendation {
        title: "Tingkatkan Motivasi",
        detail: "Tetapkan target akademik yang lebih menantang dan buat deadline yang realistis untuk meningkatkan fokus belajar.",
    },
    Recommendation {
        title: "Struktur Belajar",
        detail: "Buat jadwal belajar yang terstruktur dan konsisten. Gunakan teknik time-blocking untuk meningkatkan produktivitas.",
    },
    Recommendation {
        title: "Cari Tantangan",
        detail: "Ikuti kompetisi akademik, proyek tambahan, atau organisasi untuk menambah stimulasi intelektual.",
    },
    Recommendation {
        title: "Accountability Partner",
        detail: "Cari teman belajar atau mentor yang dapat membantu menjaga konsistensi dan motivasi belajar Anda.",
    },
];

const MODERATE_ID: [Recommendation; 4] = [
    Recommendation {
        title: "Pertahankan Balance",
        detail: "Jaga keseimbangan antara belajar, istirahat, dan aktivitas sosial. Ini adalah kunci performa stabil Anda.",
    },
    Recommendation {
        title: "Rutinitas Sehat",
        detail: "Pertahankan rutinitas tidur 7-8 jam, olahraga ringan 3x seminggu, dan waktu belajar yang konsisten.",
    },
    Recommendation {
        title: "Monitor Progress",
        detail: "Lakukan evaluasi berkala terhadap metode belajar dan tingkat stres untuk memastikan tetap optimal.",
    },
    Recommendation {
        title: "Hobi & Kreativitas",
        detail: "Luangkan waktu untuk hobi dan aktivitas kreatif sebagai outlet positif untuk menjaga keseimbangan mental.",
    },
];

const HIGH_ID: [Recommendation; 4] = [
    Recommendation {
        title: "Manajemen Stres",
        detail: "Pelajari teknik relaksasi seperti deep breathing, meditasi, atau mindfulness untuk mengelola stres berlebih.",
    },
    Recommendation {
        title: "Prioritaskan Istirahat",
        detail: "Jangan korbankan tidur untuk belajar. Tidur berkualitas 7-9 jam sangat penting untuk recovery mental.",
    },
    Recommendation {
        title: "Aktivitas Fisik Wajib",
        detail: "Jadwalkan olahraga minimal 30 menit setiap hari untuk mengurangi hormon stres dan meningkatkan endorfin.",
    },
    Recommendation {
        title: "Cari Bantuan",
        detail: "Jangan ragu untuk berkonsultasi dengan konselor atau psikolog jika stres mulai mengganggu kehidupan sehari-hari.",
    },
];

pub fn recommendations(level: StressLevel, locale: Locale) -> &'static [Recommendation] {
    match (locale, level) {
        (Locale::En, StressLevel::Low) => &LOW_EN,
        (Locale::En, StressLevel::Moderate) => &MODERATE_EN,
        (Locale::En, StressLevel::High) => &HIGH_EN,
        (Locale::Id, StressLevel::Low) => &LOW_ID,
        (Locale::Id, StressLevel::Moderate) => &MODERATE_ID,
        (Locale::Id, StressLevel::High) => &HIGH_ID,
    }
}

pub fn interpret(level: StressLevel, locale: Locale) -> Interpretation {
    Interpretation {
        level,
        label: label(level, locale),
        severity: severity(level),
        summary: summary(level, locale),
        recommendations: recommendations(level, locale).to_vec(),
    }
}

impl EstimateView {
    pub fn new(estimate: Estimate, locale: Locale) -> Self {
        Self {
            score_display: format!("{:.1}%", estimate.score),
            confidence_display: format!("{:.1}%", estimate.confidence),
            interpretation: interpret(estimate.level, locale),
            estimate,
        }
    }
}
