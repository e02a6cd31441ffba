use super::model::{Dua, IconKind};

fn dua(
    id: &str,
    category: &str,
    icon: IconKind,
    arabic: &str,
    transliteration: &str,
    translation: &str,
    reference: &str,
    tags: &[&str],
) -> Dua {
    Dua {
        id: id.to_string(),
        category: category.to_string(),
        arabic: arabic.to_string(),
        transliteration: Some(transliteration.to_string()),
        translation: translation.to_string(),
        reference: Some(reference.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        audio: None,
        illustration: None,
        icon: Some(icon),
    }
}

/// Records shown when no data file is configured.
pub fn builtin_duas() -> Vec<Dua> {
    vec![
        dua(
            "1",
            "Anxiety",
            IconKind::Cloud,
            "رَبِّ اشْرَحْ لِي صَدْرِي وَيَسِّرْ لِي أَمْرِي وَاحْلُلْ عُقْدَةً مِّن لِّسَانِي يَفْقَهُوا قَوْلِي",
            "Rabbi-shrah li sadri, wa yassir li amri, wah-lul 'uqdatam-min lisani, yafqahu qawli",
            "My Lord, expand for me my breast [with assurance] and ease for me my task and untie the knot from my tongue that they may understand my speech.",
            "Surah Taha (20:25-28)",
            &["speech", "confidence", "exam", "meeting"],
        ),
        dua(
            "2",
            "General",
            IconKind::Mosque,
            "رَبَّنَا آتِنَا فِي الدُّنْيَا حَسَنَةً وَفِي الآخِرَةِ حَسَنَةً وَقِنَا عَذَابَ النَّارِ",
            "Rabbana atina fid-dunya hasanatan wa fil 'akhirati hasanatan waqina 'adhaban-nar",
            "Our Lord, give us in this world [that which is] good and in the Hereafter [that which is] good and protect us from the punishment of the Fire.",
            "Surah Al-Baqarah (2:201)",
            &["success", "protection", "comprehensive"],
        ),
        dua(
            "3",
            "Sadness",
            IconKind::Heart,
            "لَّا إِلَهَ إِلَّا أَنتَ سُبْحَانَكَ إِنِّي كُنتُ مِنَ الظَّالِمِينَ",
            "La ilaha illa anta subhanaka inni kuntu minaz-zalimin",
            "There is no deity except You; exalted are You. Indeed, I have been of the wrongdoers.",
            "Surah Al-Anbiya (21:87)",
            &["distress", "forgiveness", "grief"],
        ),
        dua(
            "4",
            "Family",
            IconKind::Heart,
            "رَبَّنَا هَبْ لَنَا مِنْ أَزْوَاجِنَا وَذُرِّيَّاتِنَا قُرَّةَ أَعْيُنٍ وَاجْعَلْنَا لِلْمُتَّقِينَ إِمَامًا",
            "Rabbana hab lana min azwajina wa dhurriyyatina qurrata a'yunin waj'alna lil-muttaqina imama",
            "Our Lord, grant us from among our wives and offspring comfort to our eyes and make us an example for the righteous.",
            "Surah Al-Furqan (25:74)",
            &["marriage", "children", "future"],
        ),
    ]
}
