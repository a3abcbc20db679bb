//! Keyword-scored knowledge base of wellbeing topics.
//!
//! Each [`Topic`] carries a list of trigger keywords. A message is scored
//! against every topic by counting how many of its keywords occur in the
//! lower-cased message; the highest score wins and ties go to the topic
//! listed first.

/// Footer appended to every knowledge base answer.
pub const PROFESSIONAL_SUPPORT_FOOTER: &str =
    "*If you need professional support, please reach out to a mental health professional.*";

/// One entry of the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topic {
    /// Substrings that select this topic.
    pub keywords: &'static [&'static str],
    /// Opening paragraph of the answer.
    pub response: &'static str,
    /// Practical tips listed after the opening paragraph.
    pub tips: &'static [&'static str],
}

impl Topic {
    /// Number of this topic's keywords found in an already lower-cased message.
    fn score(&self, lowered: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .count()
    }

    /// Render the full answer text for this topic.
    #[must_use]
    pub fn answer(&self) -> String {
        let mut answer = self.response.to_string();
        if !self.tips.is_empty() {
            answer.push_str("\n\n");
            answer.push_str(&self.tips.join("\n"));
        }
        answer.push_str("\n\n");
        answer.push_str(PROFESSIONAL_SUPPORT_FOOTER);
        answer
    }
}

/// Lookup over a fixed set of topics.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    topics: &'static [Topic],
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::new(TOPICS)
    }
}

impl KnowledgeBase {
    #[must_use]
    pub const fn new(topics: &'static [Topic]) -> Self {
        Self { topics }
    }

    /// Find the best scoring topic, or `None` if no keyword occurs at all.
    #[must_use]
    pub fn best_match(&self, message: &str) -> Option<&'static Topic> {
        let lowered = message.to_lowercase();
        let mut best: Option<(&'static Topic, usize)> = None;

        for topic in self.topics {
            let score = topic.score(&lowered);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((topic, score));
            }
        }

        best.map(|(topic, _)| topic)
    }
}

pub const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["hello", "hi", "hey", "greetings", "howdy"],
        response: "Hello! Welcome to MindBuddy. 😊 I'm here to help you with mental health and wellbeing topics. Feel free to ask me about stress, anxiety, sleep, relationships, or any other mental health concern you have.",
        tips: &[],
    },
    Topic {
        keywords: &["anxiety", "anxious", "panic", "worried", "nervous"],
        response: "I hear you — anxiety can feel overwhelming. Here are some helpful strategies:",
        tips: &[
            "🫁 **Breathe**: Try the 4-7-8 technique: breathe in for 4 counts, hold for 7, exhale for 8.",
            "🧘 **Ground yourself**: Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, 1 you taste.",
            "📝 **Write it down**: Journaling can help process worried thoughts.",
            "🚶 **Move**: A short walk or stretching releases nervous energy.",
            "⏸️ **Limit triggers**: Reduce caffeine and news consumption if they worsen anxiety.",
            "🤝 **Talk to someone**: Share your feelings with a trusted friend or therapist.",
        ],
    },
    Topic {
        keywords: &["depression", "depressed", "sad", "hopeless", "blue", "down", "depressive"],
        response: "I'm sorry you're feeling this way. Depression is real, and you're not alone. Here's what can help:",
        tips: &[
            "🌅 **Sunlight**: Get 10–15 minutes of morning sunlight to boost mood.",
            "🏃 **Exercise**: Even a 10-minute walk increases endorphins.",
            "🛏️ **Sleep routine**: Try to keep consistent sleep/wake times.",
            "👥 **Connect**: Reach out to friends or family, even briefly.",
            "🎨 **Do something small**: Wash hands, make tea, or tidy one area to feel a sense of progress.",
            "🎵 **Music & hobbies**: Engage in things you used to enjoy.",
            "👨‍⚕️ **Seek professional help**: A therapist or counselor can provide real support.",
        ],
    },
    Topic {
        keywords: &["stress", "stressed", "overwhelmed", "overworked", "burnout", "burnt out"],
        response: "Stress and overwhelm are tough. Here are practical ways to reduce it:",
        tips: &[
            "✋ **Prioritize**: Do one important task first, then one easier one.",
            "🧘‍♀️ **Meditation**: Even 3 minutes of mindfulness can calm the nervous system.",
            "📵 **Digital detox**: Take breaks from work emails and social media.",
            "💬 **Talk**: Tell someone how you feel — don't keep it bottled up.",
            "🎯 **Set boundaries**: It's okay to say 'no' to protect your energy.",
            "🏃‍♀️ **Exercise**: Physical activity is one of the best stress relievers.",
            "😴 **Sleep**: Prioritize rest — most stress feels worse when tired.",
        ],
    },
    Topic {
        keywords: &["sleep", "insomnia", "can't sleep", "tired", "exhausted", "fatigue", "sleeping"],
        response: "Sleep problems can really affect your wellbeing. Try these proven techniques:",
        tips: &[
            "⏰ **Consistent schedule**: Go to bed and wake up at the same time daily.",
            "🌙 **Wind down**: Put away screens 1 hour before bed.",
            "🛏️ **Good environment**: Keep your bedroom cool, dark, and quiet.",
            "🍵 **Avoid stimulants**: No caffeine after 2 PM.",
            "📱 **No phones in bed**: Use your bed only for sleep.",
            "🧘 **Relaxation**: Try deep breathing, progressive muscle relaxation, or guided sleep meditations.",
            "👨‍⚕️ **See a doctor**: If it lasts weeks, talk to your healthcare provider.",
        ],
    },
    Topic {
        keywords: &["lonely", "loneliness", "alone", "isolated", "no friends"],
        response: "Loneliness is painful, but there are ways to build connection:",
        tips: &[
            "📱 **Reach out**: Text or call one person, even briefly.",
            "👥 **Join groups**: Take a class, join a club, or volunteer.",
            "🐕 **Pet companionship**: Spending time with animals helps.",
            "💻 **Online communities**: Find groups with shared interests.",
            "🎨 **Hobbies**: Engage in activities where you might meet others.",
            "🤝 **Be kind to yourself**: Loneliness is temporary; self-compassion helps.",
            "👨‍⚕️ **Talk to a therapist**: They can help address deeper feelings.",
        ],
    },
    Topic {
        keywords: &["relationship", "breakup", "broken up", "heartbreak", "conflict", "fight", "partner", "spouse"],
        response: "Relationship challenges are difficult. Here's how to navigate them:",
        tips: &[
            "💬 **Communicate**: Use 'I feel' statements instead of blame.",
            "⏸️ **Take a break**: Step away before heated conversations.",
            "🎯 **Listen**: Try to understand the other person's perspective.",
            "⏰ **Time helps**: Heartbreak and conflict fade with time.",
            "👥 **Lean on support**: Talk to friends or a therapist.",
            "📝 **Journal**: Write down your feelings to process them.",
            "❤️ **Self-care**: Invest in activities that restore you.",
        ],
    },
    Topic {
        keywords: &["self-esteem", "low self esteem", "not good enough", "worthless", "confidence", "insecure"],
        response: "Low self-esteem is painful. You deserve to see your own worth. Here's how to build it:",
        tips: &[
            "💭 **Challenge negative thoughts**: Notice them, then ask: Is this really true?",
            "📝 **Affirmations**: Say 3 things you're proud of each morning.",
            "✅ **Small wins**: Celebrate small accomplishments.",
            "🚫 **Stop comparing**: Limit time on social media.",
            "💪 **Set boundaries**: Say no to people who drain your energy.",
            "🎯 **Build skills**: Learn something new to boost confidence.",
            "👨‍⚕️ **Therapy**: A therapist can help reprogram negative self-talk.",
        ],
    },
    Topic {
        keywords: &["anger", "angry", "irritable", "rage", "furious", "frustrated"],
        response: "Anger is valid, but managing it helps. Here are strategies:",
        tips: &[
            "🫁 **Pause & breathe**: Take 10 deep breaths before reacting.",
            "🚶 **Step away**: Remove yourself from the triggering situation.",
            "💪 **Physical activity**: Exercise gets anger out safely.",
            "📝 **Journal**: Write angry thoughts without filtering.",
            "🎵 **Healthy outlets**: Listen to music, punch a pillow, or scream into one.",
            "🤝 **Talk it out**: Express anger to someone you trust.",
            "👨‍⚕️ **Explore roots**: A therapist can help identify what triggers anger.",
        ],
    },
    Topic {
        keywords: &["burnout", "tired of work", "no motivation", "exhausted at work"],
        response: "Burnout is serious and requires action. Here's what can help:",
        tips: &[
            "✋ **Take time off**: Even a weekend away helps reset.",
            "🎯 **Set work boundaries**: Don't work outside office hours.",
            "💬 **Talk to your manager**: Discuss workload and priorities.",
            "🧘 **Mindfulness**: Daily meditation reduces burnout symptoms.",
            "🎨 **Rediscover joy**: Do things you love outside work.",
            "🏃 **Exercise**: Builds resilience and mood.",
            "👨‍⚕️ **Consider a career change**: If unhappy, explore other options.",
        ],
    },
    Topic {
        keywords: &["focus", "can't concentrate", "distracted", "adhd", "attention", "focus problems"],
        response: "Trouble focusing is frustrating. Try these proven techniques:",
        tips: &[
            "🍅 **Pomodoro**: Work 25 minutes, break 5 minutes.",
            "📵 **Eliminate distractions**: Put phone in another room.",
            "☕ **Fuel your brain**: Eat protein and drink water.",
            "🎧 **White noise**: Some people focus better with background sounds.",
            "📍 **One task**: Don't multitask; do one thing at a time.",
            "😴 **Rest first**: Tired brains can't focus; prioritize sleep.",
            "👨‍⚕️ **See a doctor**: ADHD or other conditions might need professional support.",
        ],
    },
    Topic {
        keywords: &["grief", "grieving", "loss", "lost someone", "died", "death", "mourning"],
        response: "Grief is profound. There's no timeline — take the time you need:",
        tips: &[
            "💭 **Allow emotions**: Crying and sadness are healthy parts of grief.",
            "👥 **Be with others**: Spend time with people who understand.",
            "📝 **Honor their memory**: Write, make art, or talk about them.",
            "⏸️ **Self-care**: Eat, sleep, and move even when it's hard.",
            "🙏 **Support groups**: Connect with others who've experienced loss.",
            "🚫 **Avoid numbing**: Don't escape with substances; face the feelings.",
            "👨‍⚕️ **Grief counseling**: A therapist specializing in grief can help immensely.",
        ],
    },
    Topic {
        keywords: &["self-harm", "cutting", "self-injury", "hurt myself"],
        response: "I'm concerned, and I'm glad you're reaching out. Self-harm is a sign you need real support.",
        tips: &[
            "🆘 **Crisis support**: Call 988 (US) or your local crisis line immediately.",
            "👥 **Tell someone**: Confide in a trusted person today.",
            "🧊 **Alternative coping**: Hold ice, take a cold shower, or snap a rubber band.",
            "✍️ **Journal**: Write about what you're feeling instead of hurting yourself.",
            "🎨 **Outlet**: Draw, scream, exercise, or use a punching bag.",
            "👨‍⚕️ **Get professional help**: A therapist can teach healthier coping strategies.",
            "💬 **Crisis text line**: Text HOME to 741741 (US).",
        ],
    },
    Topic {
        keywords: &["body image", "fat", "ugly", "hate my body", "appearance", "looks"],
        response: "Body image struggles are common and painful. Here's how to heal:",
        tips: &[
            "📱 **Unfollow**: Remove accounts that trigger comparison.",
            "🪞 **Reframe mirrors**: Look for what your body can do, not just how it looks.",
            "💬 **Challenge criticism**: Replace negative self-talk with kindness.",
            "👗 **Wear what feels good**: Clothes that make you comfortable.",
            "👥 **Surround yourself**: Spend time with people who value you for you.",
            "🚫 **Avoid diet culture**: Restrict extremes and obsessive health tracking.",
            "👨‍⚕️ **Therapy**: Body image issues benefit greatly from professional support.",
        ],
    },
    Topic {
        keywords: &["tips", "help", "advice", "wellness", "self-care", "healthy"],
        response: "Here are universal wellbeing tips that help most people:",
        tips: &[
            "😴 **Sleep**: 7–9 hours of consistent sleep is foundational.",
            "🏃 **Move**: 30 minutes of activity 5 days/week boosts mood.",
            "🥗 **Eat well**: Balanced nutrition supports mental health.",
            "👥 **Connect**: Spend time with people you care about.",
            "🧘 **Meditate**: Even 5 minutes daily reduces stress.",
            "🌙 **Limit screen time**: Especially before bed.",
            "🎨 **Do what you enjoy**: Hobbies and interests matter.",
        ],
    },
];
